//! Journal entry types and the tag column codec.
//!
//! # Design
//! `tags` is persisted as a JSON-encoded array in a TEXT column. Writes always
//! go through [`encode_tags`], so every row holds a valid array; reads go
//! through [`decode_tags`], which treats an absent or malformed value as an
//! empty list instead of failing the whole read.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Store-assigned entry identifier.
pub type EntryId = i64;

/// A single mood note as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub note: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub created_at: String,
}

/// Fields accepted by [`EntryStore::create`](crate::store::EntryStore::create).
///
/// No validation happens at this level; the HTTP layer rejects blank fields
/// before a `NewEntry` is ever built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub note: String,
    pub mood: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewEntry {
    pub fn new(title: impl Into<String>, note: impl Into<String>, mood: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note: note.into(),
            mood: mood.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update. Every `None` field keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.note.is_none() && self.mood.is_none() && self.tags.is_none()
    }
}

pub fn encode_tags(tags: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tags)
}

/// Decode a stored tags value, falling back to an empty list.
pub fn decode_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tags) => tags,
        Err(err) => {
            warn!(error = %err, "stored tags are not a JSON string array; treating as empty");
            Vec::new()
        }
    }
}
