use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Latest exchange price for one trading pair. `price` is stored as
/// integer 10^-8 units of the quote currency.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticker {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub sign: String,
    pub price: i64,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertTicker {
    pub symbol: String,
    pub name: String,
    pub sign: String,
    pub price: i64,
    pub fetched_at: DateTime<Utc>,
}
