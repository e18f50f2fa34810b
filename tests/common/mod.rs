use async_trait::async_trait;
use nft_floor_monitor::error::AppError;
use nft_floor_monitor::models::{Collection, Ticker, UpsertCollection, UpsertTicker};
use nft_floor_monitor::services::{CollectionStore, TickerStore};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory stand-ins for the Postgres stores, keyed by symbol with
/// the same upsert semantics.
#[derive(Default)]
pub struct MemoryCollectionStore {
    records: Mutex<HashMap<String, Collection>>,
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
    async fn upsert(&self, record: &UpsertCollection) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        let id = records
            .get(&record.symbol)
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);
        records.insert(
            record.symbol.clone(),
            Collection {
                id,
                symbol: record.symbol.clone(),
                name: record.name.clone(),
                sort_order: record.sort_order,
                image_url: record.image_url.clone(),
                marketplace_url: record.marketplace_url.clone(),
                color: record.color,
                floor_price: record.floor_price,
                listed_count: record.listed_count,
                avg_price_24hr: record.avg_price_24hr,
                volume_all: record.volume_all,
                fetched_at: record.fetched_at,
            },
        );
        Ok(())
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Collection>, AppError> {
        Ok(self.records.lock().unwrap().get(symbol).cloned())
    }

    async fn list(&self) -> Result<Vec<Collection>, AppError> {
        let mut records: Vec<Collection> =
            self.records.lock().unwrap().values().cloned().collect();
        records.sort_by(|a, b| (a.sort_order, &a.symbol).cmp(&(b.sort_order, &b.symbol)));
        Ok(records)
    }

    async fn latest_fetched(&self) -> Result<Option<Collection>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .max_by_key(|c| c.fetched_at)
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct MemoryTickerStore {
    records: Mutex<HashMap<String, Ticker>>,
}

#[async_trait]
impl TickerStore for MemoryTickerStore {
    async fn upsert(&self, record: &UpsertTicker) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        let id = records
            .get(&record.symbol)
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);
        records.insert(
            record.symbol.clone(),
            Ticker {
                id,
                symbol: record.symbol.clone(),
                name: record.name.clone(),
                sign: record.sign.clone(),
                price: record.price,
                fetched_at: record.fetched_at,
            },
        );
        Ok(())
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Ticker>, AppError> {
        Ok(self.records.lock().unwrap().get(symbol).cloned())
    }

    async fn list(&self) -> Result<Vec<Ticker>, AppError> {
        let mut records: Vec<Ticker> = self.records.lock().unwrap().values().cloned().collect();
        records.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(records)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }
}
