use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use teller_core::LedgerError;

/// Map a domain failure onto the wire: each kind gets a stable `error` code
/// and a distinct HTTP status.
pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::InvalidAmount => {
            json_error(StatusCode::BAD_REQUEST, "invalid_amount", err.to_string())
        }
        LedgerError::SameAccount => {
            json_error(StatusCode::BAD_REQUEST, "same_account", err.to_string())
        }
        LedgerError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        LedgerError::InsufficientBalance => json_error(
            StatusCode::CONFLICT,
            "insufficient_balance",
            err.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
