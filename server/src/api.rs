//! REST handlers for `/api/entries`.
//!
//! # Design
//! Handlers validate input, call one store operation and map the outcome to a
//! status code. Validation failures return before the store is touched.
//! Every error body has the shape `{"error": "<message>"}`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::entry::{Entry, EntryId, EntryPatch, NewEntry};
use crate::error::StoreError;
use crate::store::EntryStore;

/// POST body. Required fields are optional here so that a missing field is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateEntry {
    pub title: Option<String>,
    pub note: Option<String>,
    pub mood: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Created {
    pub id: EntryId,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid id")]
    InvalidId,

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            other => ApiError::InvalidBody(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Store(err) => {
                error!(error = %err, "storage failure while handling request");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn routes() -> Router<EntryStore> {
    Router::new()
        .route("/api/entries", get(list_entries).post(create_entry))
        .route(
            "/api/entries/{id}",
            get(get_entry).patch(update_entry).delete(delete_entry),
        )
}

async fn list_entries(State(store): State<EntryStore>) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(store.list().await?))
}

async fn create_entry(
    State(store): State<EntryStore>,
    body: Result<Json<CreateEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let Json(input) = body?;
    let entry = validate_create(input)?;
    let id = store.create(&entry).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

async fn get_entry(
    State(store): State<EntryStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    let id = parse_id(&raw_id)?;
    store.get(id).await?.map(Json).ok_or(ApiError::NotFound)
}

async fn update_entry(
    State(store): State<EntryStore>,
    Path(raw_id): Path<String>,
    body: Result<Json<EntryPatch>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = body?;
    validate_patch(&patch)?;
    store
        .update(id, &patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_entry(
    State(store): State<EntryStore>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    if store.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

fn parse_id(raw: &str) -> Result<EntryId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

fn validate_create(input: CreateEntry) -> Result<NewEntry, ApiError> {
    match input {
        CreateEntry {
            title: Some(title),
            note: Some(note),
            mood: Some(mood),
            tags,
        } if !title.trim().is_empty() && !note.trim().is_empty() && !mood.trim().is_empty() => {
            Ok(NewEntry {
                title,
                note,
                mood,
                tags: tags.unwrap_or_default(),
            })
        }
        _ => Err(ApiError::Validation(
            "title, note, and mood are required".to_string(),
        )),
    }
}

fn validate_patch(patch: &EntryPatch) -> Result<(), ApiError> {
    let blank: Vec<&str> = [
        ("title", &patch.title),
        ("note", &patch.note),
        ("mood", &patch.mood),
    ]
    .into_iter()
    .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
    .map(|(name, _)| name)
    .collect();

    if blank.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "{} cannot be empty",
            blank.join(", ")
        )))
    }
}
