//! HTTP application wiring (Axum router + shared state).
//!
//! Layout:
//! - `state.rs`: ledger + persistence wiring shared by all handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// Every endpoint is reachable both at the root and under `/api/v1`, so
/// existing clients keep working while versioned paths are introduced.
pub fn build_app(state: Arc<AppState>) -> Router {
    let v1 = Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state));

    Router::new().nest("/api/v1", v1.clone()).merge(v1)
}
