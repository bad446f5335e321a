//! Client-side helpers over a fetched entry list: tag input parsing,
//! search/mood filtering and summary counts.

use std::collections::HashMap;

use crate::types::Entry;

/// Split comma separated tag input, trimming and dropping empty pieces.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive text search on title/note plus an optional exact mood.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub query: String,
    pub mood: Option<String>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        let query = self.query.to_lowercase();
        let matches_query = entry.title.to_lowercase().contains(&query)
            || entry.note.to_lowercase().contains(&query);
        let matches_mood = self.mood.as_deref().is_none_or(|mood| entry.mood == mood);
        matches_query && matches_mood
    }

    /// Matching entries, in list order.
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodSummary {
    pub total: usize,
    /// Most frequent mood; ties go to the mood seen first. `None` when empty.
    pub top_mood: Option<String>,
    pub tag_count: usize,
}

impl MoodSummary {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, entry) in entries.iter().enumerate() {
            counts.entry(entry.mood.as_str()).or_insert((0, position)).0 += 1;
        }

        let top_mood = counts
            .into_iter()
            .max_by(|(_, (a_count, a_first)), (_, (b_count, b_first))| {
                a_count.cmp(b_count).then(b_first.cmp(a_first))
            })
            .map(|(mood, _)| mood.to_string());

        Self {
            total: entries.len(),
            top_mood,
            tag_count: entries.iter().map(|entry| entry.tags.len()).sum(),
        }
    }
}
