//! Mood journal REST service.
//!
//! # Overview
//! Persists journal entries in an embedded SQLite database and exposes them as
//! JSON under `/api/entries`.
//!
//! # Design
//! - `EntryStore` is an explicit, cloneable handle passed to the router as
//!   state; nothing is held in process globals.
//! - `seed` runs before the listener is bound, so the first request already
//!   sees the sample data.
//! - `api` owns validation and status mapping; the store accepts whatever it
//!   is given.

pub mod api;
pub mod config;
pub mod entry;
pub mod error;
pub mod seed;
pub mod store;
pub mod telemetry;

use axum::{http::HeaderValue, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use api::{ApiError, Created};
pub use config::ServerConfig;
pub use entry::{Entry, EntryId, EntryPatch, NewEntry};
pub use error::{StoreError, StoreResult};
pub use store::EntryStore;

/// Router with permissive CORS.
pub fn app(store: EntryStore) -> Router {
    app_with_config(store, &ServerConfig::default())
}

pub fn app_with_config(store: EntryStore, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api::routes())
        .with_state(store)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, store: EntryStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

pub async fn serve(
    listener: TcpListener,
    store: EntryStore,
    config: &ServerConfig,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_config(store, config)).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
