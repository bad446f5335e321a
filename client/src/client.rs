//! Stateless request builder and response parser for the entries API.
//!
//! # Design
//! `EntryClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes the matching `HttpResponse`. The caller executes the round-trip.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateEntry, Created, Entry, UpdateEntry};

const FALLBACK_MESSAGE: &str = "request failed";

/// Synchronous, stateless client for the entries API.
#[derive(Debug, Clone)]
pub struct EntryClient {
    base_url: String,
}

impl EntryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/entries", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/entries/{id}", self.base_url)
    }

    pub fn build_list_entries(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_entry(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_entry(&self, input: &CreateEntry) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::SerializationError)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_entry(&self, id: i64, input: &UpdateEntry) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::SerializationError)?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_entry(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_entries(&self, response: HttpResponse) -> Result<Vec<Entry>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_entry(&self, response: HttpResponse) -> Result<Entry, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// Returns the id assigned by the server.
    pub fn parse_create_entry(&self, response: HttpResponse) -> Result<i64, ApiError> {
        check_status(&response, 201)?;
        decode::<Created>(&response).map(|created| created.id)
    }

    pub fn parse_update_entry(&self, response: HttpResponse) -> Result<Entry, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_delete_entry(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::DeserializationError)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound {
            message: error_message(&response.body),
        });
    }
    Err(ApiError::HttpError {
        status: response.status,
        message: error_message(&response.body),
    })
}

/// The server's `{"error": ...}` message, else the raw body text.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        return error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EntryClient {
        EntryClient::new("http://localhost:4000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_entries_produces_correct_request() {
        let req = client().build_list_entries();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:4000/api/entries");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_entry_produces_correct_request() {
        let input = CreateEntry {
            title: "Tea".to_string(),
            note: "Green tea".to_string(),
            mood: "calm".to_string(),
            tags: vec!["ritual".to_string()],
        };
        let req = client().build_create_entry(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:4000/api/entries");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Tea");
        assert_eq!(body["tags"], serde_json::json!(["ritual"]));
    }

    #[test]
    fn build_update_entry_omits_absent_fields() {
        let input = UpdateEntry {
            mood: Some("grateful".to_string()),
            ..UpdateEntry::default()
        };
        let req = client().build_update_entry(12, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:4000/api/entries/12");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "mood": "grateful" }));
    }

    #[test]
    fn build_delete_entry_produces_correct_request() {
        let req = client().build_delete_entry(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:4000/api/entries/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_entries_success() {
        let body = r#"[{"id":1,"title":"Tea","note":"n","mood":"calm","tags":["a"],"created_at":"2024-05-01T08:00:00.000Z"}]"#;
        let entries = client().parse_list_entries(response(200, body)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tags, vec!["a"]);
    }

    #[test]
    fn parse_create_entry_returns_id() {
        let id = client().parse_create_entry(response(201, r#"{"id":17}"#)).unwrap();
        assert_eq!(id, 17);
    }

    #[test]
    fn parse_create_entry_surfaces_server_message() {
        let err = client()
            .parse_create_entry(response(400, r#"{"error":"title, note, and mood are required"}"#))
            .unwrap_err();
        match err {
            ApiError::HttpError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "title, note, and mood are required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_error_falls_back_to_raw_text() {
        let err = client()
            .parse_update_entry(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref message } if message == "internal error"));

        let err = client().parse_update_entry(response(502, "")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { ref message, .. } if message == "request failed"));
    }

    #[test]
    fn parse_delete_entry_success_and_not_found() {
        assert!(client().parse_delete_entry(response(204, "")).is_ok());
        let err = client().parse_delete_entry(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref message } if message == "request failed"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn not_found_keeps_server_message() {
        let err = client()
            .parse_get_entry(response(404, r#"{"error":"Not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref message } if message == "Not found"));
        assert_eq!(err.to_string(), "not found: Not found");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = EntryClient::new("http://localhost:4000/");
        assert_eq!(client.build_list_entries().path, "http://localhost:4000/api/entries");
    }

    #[test]
    fn parse_list_entries_bad_json() {
        let err = client().parse_list_entries(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
