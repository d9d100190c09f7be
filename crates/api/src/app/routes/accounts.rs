use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use teller_core::AccountId;

use crate::app::{AppState, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/accounts", post(create_account).get(list_accounts))
        .route("/accounts/:id", get(get_account))
        .route("/accounts/:id/deposit", post(deposit))
        .route("/accounts/:id/withdraw", post(withdraw))
        .route("/accounts/:id/logs", get(get_logs))
}

pub async fn create_account(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    match state.ledger.create(&body.name, body.balance) {
        Ok(account) => {
            state.persist();
            (
                StatusCode::CREATED,
                Json(dto::account_to_json(&account)),
            )
                .into_response()
        }
        Err(err) => errors::ledger_error_to_response(err),
    }
}

pub async fn list_accounts(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    let items = state
        .ledger
        .list()
        .iter()
        .map(dto::account_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_account(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = AccountId::from(id);
    match state.ledger.get(&id) {
        Ok(account) => (StatusCode::OK, Json(dto::account_to_json(&account))).into_response(),
        Err(err) => errors::ledger_error_to_response(err),
    }
}

pub async fn deposit(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let id = AccountId::from(id);
    match state.ledger.deposit(&id, body.amount) {
        Ok(account) => {
            state.persist();
            (StatusCode::OK, Json(dto::account_to_json(&account))).into_response()
        }
        Err(err) => errors::ledger_error_to_response(err),
    }
}

pub async fn withdraw(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let id = AccountId::from(id);
    match state.ledger.withdraw(&id, body.amount) {
        Ok(account) => {
            state.persist();
            (StatusCode::OK, Json(dto::account_to_json(&account))).into_response()
        }
        Err(err) => errors::ledger_error_to_response(err),
    }
}

pub async fn get_logs(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = AccountId::from(id);
    match state.ledger.logs(&id) {
        Ok(logs) => (StatusCode::OK, Json(logs)).into_response(),
        Err(err) => errors::ledger_error_to_response(err),
    }
}
