use crate::error::AppError;
use crate::models::{Ticker, UpsertTicker};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Persisted store of exchange ticker records, one row per trading pair.
#[async_trait]
pub trait TickerStore: Send + Sync {
    async fn upsert(&self, record: &UpsertTicker) -> Result<(), AppError>;

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Ticker>, AppError>;

    async fn list(&self) -> Result<Vec<Ticker>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

#[derive(Debug, Clone)]
pub struct PgTickerStore {
    db_pool: PgPool,
}

impl PgTickerStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TickerStore for PgTickerStore {
    async fn upsert(&self, record: &UpsertTicker) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO tickers (id, symbol, name, sign, price, fetched_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (symbol) DO UPDATE SET
                name = EXCLUDED.name,
                sign = EXCLUDED.sign,
                price = EXCLUDED.price,
                fetched_at = EXCLUDED.fetched_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.symbol)
        .bind(&record.name)
        .bind(&record.sign)
        .bind(record.price)
        .bind(record.fetched_at)
        .execute(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Ticker>, AppError> {
        let record = sqlx::query_as::<_, Ticker>("SELECT * FROM tickers WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Ticker>, AppError> {
        let records = sqlx::query_as::<_, Ticker>("SELECT * FROM tickers ORDER BY symbol ASC")
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(records)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickers")
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count)
    }
}
