//! Client binding for the mood journal API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the actual
//! HTTP round-trip.
//!
//! # Design
//! - `EntryClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit.
//! - Non-2xx responses surface the server's error message.
//! - `view` holds the list helpers a UI needs once entries are fetched.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::EntryClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateEntry, Created, Entry, UpdateEntry};
pub use view::{split_tags, EntryFilter, MoodSummary};
