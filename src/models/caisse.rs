//! Cash register models shared with the REST backend

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of ledger movement recorded against a caisse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Deposit,
    Withdrawal,
    Sale,
    PurchasePayment,
    Adjustment,
    /// Any type the backend adds later
    #[serde(other)]
    Other,
}

impl OperationType {
    /// Wire value, used for the `operation_type` query filter
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposit => "DEPOSIT",
            OperationType::Withdrawal => "WITHDRAWAL",
            OperationType::Sale => "SALE",
            OperationType::PurchasePayment => "PURCHASE_PAYMENT",
            OperationType::Adjustment => "ADJUSTMENT",
            OperationType::Other => "OTHER",
        }
    }

    /// Parse a user supplied filter value (case-insensitive)
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "DEPOSIT" => Some(OperationType::Deposit),
            "WITHDRAWAL" => Some(OperationType::Withdrawal),
            "SALE" => Some(OperationType::Sale),
            "PURCHASE_PAYMENT" => Some(OperationType::PurchasePayment),
            "ADJUSTMENT" => Some(OperationType::Adjustment),
            _ => None,
        }
    }
}

/// A cash register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caisse {
    pub id: i64,
    pub name: String,
    pub current_balance: Decimal,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A cash register together with its recent operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaisseDetail {
    #[serde(flatten)]
    pub caisse: Caisse,
    #[serde(default)]
    pub operations: Vec<CaisseOperation>,
}

/// One entry in a caisse ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaisseOperation {
    pub id: i64,
    pub caisse: i64,
    pub caisse_name: String,
    pub operation_type: OperationType,
    pub operation_type_display: String,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub description: Option<String>,
    pub reference_id: Option<String>,
    pub performed_by: Option<i64>,
    pub performed_by_username: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /caisse/{id}/deposit/` and `POST /caisse/{id}/withdraw/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransferRequest {
    pub fn new(amount: Decimal, description: &str) -> Self {
        let description = description.trim();
        TransferRequest {
            amount,
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        }
    }
}

/// Response of a successful deposit or withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub current_balance: Option<Decimal>,
}

impl TransferResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Body of `POST /caisse/`
#[derive(Debug, Clone, Serialize)]
pub struct CreateCaisseRequest {
    pub name: String,
}

/// Django REST framework page envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
