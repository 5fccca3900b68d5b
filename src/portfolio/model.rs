use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One holding row. `owner_id` is an account UUID string or a guest id.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PortfolioEntry {
    pub id: Uuid,
    pub owner_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated input for an insert.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub owner_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
}
