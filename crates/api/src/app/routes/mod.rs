use axum::Router;

pub mod accounts;
pub mod system;
pub mod transfer;

/// Router for all ledger endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(accounts::router())
        .merge(transfer::router())
}
