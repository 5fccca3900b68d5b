use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::IdentityKind;

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MigrateResponse {
    pub migrated: u64,
    pub message: String,
}

/// Live usage figures clients use to reconcile their local guest counters.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UsageResponse {
    pub identity_kind: IdentityKind,
    pub entries: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_limit: Option<i64>,
}
