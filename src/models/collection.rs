use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Latest known marketplace state for one tracked collection.
/// All monetary fields are lamports.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Collection {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub sort_order: i32,
    pub image_url: String,
    pub marketplace_url: String,
    pub color: i32,
    pub floor_price: i64,
    pub listed_count: i64,
    pub avg_price_24hr: i64,
    pub volume_all: i64,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertCollection {
    pub symbol: String,
    pub name: String,
    pub sort_order: i32,
    pub image_url: String,
    pub marketplace_url: String,
    pub color: i32,
    pub floor_price: i64,
    pub listed_count: i64,
    pub avg_price_24hr: i64,
    pub volume_all: i64,
    pub fetched_at: DateTime<Utc>,
}

impl Collection {
    /// Collections flagged with `sort_order == 0` are shown on the
    /// dashboard but left out of the aggregate floor price.
    pub fn counts_toward_total(&self) -> bool {
        self.sort_order != 0
    }
}
