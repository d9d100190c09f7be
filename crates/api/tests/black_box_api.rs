use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use teller_api::app::{self, AppState};
use teller_ledger::Ledger;
use teller_storage::JsonStore;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the same router as prod, bound to an ephemeral port.
    async fn spawn(state: Arc<AppState>) -> Self {
        let app = app::build_app(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_in_memory() -> Self {
        Self::spawn(AppState::new(Ledger::new(), None)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: Value,
    want: StatusCode,
) -> Value {
    let res = client.post(url).json(&body).send().await.unwrap();
    assert_eq!(res.status(), want);
    res.json().await.unwrap()
}

async fn create_account(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    balance: i64,
) -> String {
    let account = post_json(
        client,
        format!("{base_url}/accounts"),
        json!({"name": name, "balance": balance}),
        StatusCode::CREATED,
    )
    .await;
    account["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn account_lifecycle_over_http() {
    let srv = TestServer::spawn_in_memory().await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "A", 1000).await;
    let b = create_account(&client, &srv.base_url, "B", 500).await;
    assert_ne!(a, b);

    let after_deposit = post_json(
        &client,
        format!("{}/accounts/{}/deposit", srv.base_url, a),
        json!({"amount": 200}),
        StatusCode::OK,
    )
    .await;
    assert_eq!(after_deposit["balance"], 1200);

    let after_withdraw = post_json(
        &client,
        format!("{}/accounts/{}/withdraw", srv.base_url, b),
        json!({"amount": 100}),
        StatusCode::OK,
    )
    .await;
    assert_eq!(after_withdraw["balance"], 400);

    let transfer = post_json(
        &client,
        format!("{}/transfer", srv.base_url),
        json!({"from": a, "to": b, "amount": 800}),
        StatusCode::OK,
    )
    .await;
    assert_eq!(transfer["message"], "transfer success");
    assert_eq!(transfer["from"]["balance"], 400);
    assert_eq!(transfer["to"]["balance"], 1200);

    let got: Value = client
        .get(format!("{}/accounts/{}", srv.base_url, a))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(got["balance"], 400);

    let list: Value = client
        .get(format!("{}/accounts", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["items"].as_array().unwrap().len(), 2);

    let logs: Value = client
        .get(format!("{}/accounts/{}/logs", srv.base_url, b))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["direction"], "out");
    assert_eq!(logs[0]["amount"], 100);
    assert_eq!(logs[1]["direction"], "in");
    assert_eq!(logs[1]["amount"], 800);
    assert_eq!(logs[1]["counter_account"], a.as_str());
}

#[tokio::test]
async fn domain_errors_map_to_distinct_statuses() {
    let srv = TestServer::spawn_in_memory().await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "A", 100).await;
    let b = create_account(&client, &srv.base_url, "B", 100).await;

    // Negative initial balance → 400.
    let res = client
        .post(format!("{}/accounts", srv.base_url))
        .json(&json!({"name": "C", "balance": -1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_amount");

    // Zero deposit → 400.
    let body = post_json(
        &client,
        format!("{}/accounts/{}/deposit", srv.base_url, a),
        json!({"amount": 0}),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "invalid_amount");

    // Unknown account → 404.
    let res = client
        .get(format!("{}/accounts/404404", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Overdraft transfer → 409, balances untouched.
    let body = post_json(
        &client,
        format!("{}/transfer", srv.base_url),
        json!({"from": a, "to": b, "amount": 999_999}),
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(body["error"], "insufficient_balance");
    let got: Value = client
        .get(format!("{}/accounts/{}", srv.base_url, a))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(got["balance"], 100);

    // Self-transfer → 400.
    let body = post_json(
        &client,
        format!("{}/transfer", srv.base_url),
        json!({"from": a, "to": a, "amount": 1}),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "same_account");

    // Wrong method → 405.
    let res = client
        .get(format!("{}/transfer", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    // Malformed JSON body → 400.
    let res = client
        .post(format!("{}/accounts/{}/deposit", srv.base_url, a))
        .header("content-type", "application/json")
        .body("{bad json}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_accepts_legacy_capitalized_keys() {
    let srv = TestServer::spawn_in_memory().await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "A", 300).await;
    let b = create_account(&client, &srv.base_url, "B", 0).await;

    let transfer = post_json(
        &client,
        format!("{}/transfer", srv.base_url),
        json!({"From": a, "To": b, "Amount": 300}),
        StatusCode::OK,
    )
    .await;
    assert_eq!(transfer["to"]["balance"], 300);
}

#[tokio::test]
async fn endpoints_are_mounted_under_api_v1_too() {
    let srv = TestServer::spawn_in_memory().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/v1/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let account = post_json(
        &client,
        format!("{}/api/v1/accounts", srv.base_url),
        json!({"name": "A", "balance": 10}),
        StatusCode::CREATED,
    )
    .await;

    // Same ledger behind both mounts.
    let got: Value = client
        .get(format!(
            "{}/accounts/{}",
            srv.base_url,
            account["id"].as_str().unwrap()
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(got["balance"], 10);
}

#[tokio::test]
async fn successful_mutations_persist_a_loadable_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = JsonStore::new(&path);

    let srv = TestServer::spawn(AppState::new(Ledger::new(), Some(store.clone()))).await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "A", 1000).await;
    post_json(
        &client,
        format!("{}/accounts/{}/deposit", srv.base_url, a),
        json!({"amount": 500}),
        StatusCode::OK,
    )
    .await;

    let snapshot = store.load().expect("snapshot file should exist");
    assert_eq!(snapshot.accounts.len(), 1);
    assert_eq!(snapshot.accounts[0].balance, 1500);
    assert_eq!(snapshot.accounts[0].logs.len(), 1);

    // Failed mutations must not disturb the last good snapshot.
    post_json(
        &client,
        format!("{}/accounts/{}/withdraw", srv.base_url, a),
        json!({"amount": 999_999}),
        StatusCode::CONFLICT,
    )
    .await;
    let snapshot = store.load().unwrap();
    assert_eq!(snapshot.accounts[0].balance, 1500);

    // A fresh ledger restored from the file sees the same state.
    let restored = Ledger::new();
    restored.restore(snapshot);
    assert_eq!(restored.list().len(), 1);
}
