use serde::Deserialize;

use teller_ledger::Account;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    /// Initial balance in smallest currency unit; defaults to 0.
    #[serde(default)]
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: i64,
}

/// Transfer body. The capitalized aliases keep the legacy wire format
/// working.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    #[serde(alias = "From")]
    pub from: String,
    #[serde(alias = "To")]
    pub to: String,
    #[serde(alias = "Amount")]
    pub amount: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Account as exposed over HTTP. History is deliberately omitted; it has its
/// own endpoint.
pub fn account_to_json(account: &Account) -> serde_json::Value {
    serde_json::json!({
        "id": account.id,
        "name": account.name,
        "balance": account.balance,
    })
}
