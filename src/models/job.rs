use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Durable state of one scheduled job; keeps the poll cadence across
/// process restarts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchedulerJob {
    pub id: String,
    pub interval_seconds: i64,
    pub next_run: DateTime<Utc>,
    pub last_run: Option<DateTime<Utc>>,
}
