//! Wire DTOs for the entries API.
//!
//! # Design
//! These mirror the server's JSON but are defined independently so the client
//! does not pull in Axum or sqlx. The integration test catches schema drift.

use serde::{Deserialize, Serialize};

/// A journal entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub note: String,
    pub mood: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
}

/// Request payload for creating an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntry {
    pub title: String,
    pub note: String,
    pub mood: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are applied; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of a successful create.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Created {
    pub id: i64,
}
