use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use teller_core::AccountId;

use crate::app::{AppState, dto, errors};

pub fn router() -> Router {
    Router::new().route("/transfer", post(transfer))
}

pub async fn transfer(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::TransferRequest>,
) -> axum::response::Response {
    let from = AccountId::from(body.from);
    let to = AccountId::from(body.to);

    if let Err(err) = state.ledger.transfer(&from, &to, body.amount) {
        return errors::ledger_error_to_response(err);
    }
    state.persist();

    // Echo both sides' post-transfer state.
    let from_account = state.ledger.get(&from).ok();
    let to_account = state.ledger.get(&to).ok();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "transfer success",
            "from": from_account.as_ref().map(dto::account_to_json),
            "to": to_account.as_ref().map(dto::account_to_json),
        })),
    )
        .into_response()
}
