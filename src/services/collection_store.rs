use crate::error::AppError;
use crate::models::{Collection, UpsertCollection};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Persisted store of collection records, one row per symbol.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Create the record on first sight of a symbol, update it in place
    /// afterwards. Records are never deleted.
    async fn upsert(&self, record: &UpsertCollection) -> Result<(), AppError>;

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Collection>, AppError>;

    /// All records in dashboard order.
    async fn list(&self) -> Result<Vec<Collection>, AppError>;

    /// The most recently refreshed record, if any.
    async fn latest_fetched(&self) -> Result<Option<Collection>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

#[derive(Debug, Clone)]
pub struct PgCollectionStore {
    db_pool: PgPool,
}

impl PgCollectionStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CollectionStore for PgCollectionStore {
    async fn upsert(&self, record: &UpsertCollection) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO collections
                (id, symbol, name, sort_order, image_url, marketplace_url, color,
                 floor_price, listed_count, avg_price_24hr, volume_all, fetched_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (symbol) DO UPDATE SET
                name = EXCLUDED.name,
                sort_order = EXCLUDED.sort_order,
                image_url = EXCLUDED.image_url,
                marketplace_url = EXCLUDED.marketplace_url,
                color = EXCLUDED.color,
                floor_price = EXCLUDED.floor_price,
                listed_count = EXCLUDED.listed_count,
                avg_price_24hr = EXCLUDED.avg_price_24hr,
                volume_all = EXCLUDED.volume_all,
                fetched_at = EXCLUDED.fetched_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.symbol)
        .bind(&record.name)
        .bind(record.sort_order)
        .bind(&record.image_url)
        .bind(&record.marketplace_url)
        .bind(record.color)
        .bind(record.floor_price)
        .bind(record.listed_count)
        .bind(record.avg_price_24hr)
        .bind(record.volume_all)
        .bind(record.fetched_at)
        .execute(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Collection>, AppError> {
        let record = sqlx::query_as::<_, Collection>(
            "SELECT * FROM collections WHERE symbol = $1",
        )
        .bind(symbol)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Collection>, AppError> {
        let records = sqlx::query_as::<_, Collection>(
            "SELECT * FROM collections ORDER BY sort_order ASC, symbol ASC",
        )
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(records)
    }

    async fn latest_fetched(&self) -> Result<Option<Collection>, AppError> {
        let record = sqlx::query_as::<_, Collection>(
            "SELECT * FROM collections ORDER BY fetched_at DESC LIMIT 1",
        )
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(record)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collections")
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count)
    }
}
