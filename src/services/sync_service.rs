use crate::config::{CollectionDescriptor, TickerDescriptor, Watchlist};
use crate::error::AppError;
use crate::models::{FloorChange, UpsertCollection, UpsertTicker};
use crate::services::binance::{parse_price_units, BinanceClient};
use crate::services::magiceden::MagicEdenClient;
use crate::services::{AlertService, CollectionStore, Job, TickerStore};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

/// Polls the remote APIs for every watchlist entry and reconciles the
/// stores, notifying webhooks on floor-price moves.
pub struct SyncService {
    collections: Arc<dyn CollectionStore>,
    tickers: Arc<dyn TickerStore>,
    magiceden: MagicEdenClient,
    binance: BinanceClient,
    alerts: AlertService,
    watchlist: Watchlist,
    symbol_delay: Duration,
}

impl SyncService {
    pub fn new(
        collections: Arc<dyn CollectionStore>,
        tickers: Arc<dyn TickerStore>,
        magiceden: MagicEdenClient,
        binance: BinanceClient,
        alerts: AlertService,
        watchlist: Watchlist,
        symbol_delay: Duration,
    ) -> Self {
        Self {
            collections,
            tickers,
            magiceden,
            binance,
            alerts,
            watchlist,
            symbol_delay,
        }
    }

    /// One marketplace poll cycle. A failing symbol is logged and
    /// skipped; its stored record keeps the previous values until the
    /// next cycle.
    pub async fn sync_collections(&self) -> Result<(), AppError> {
        info!(
            "Syncing {} marketplace collections",
            self.watchlist.collections.len()
        );

        for descriptor in &self.watchlist.collections {
            if let Err(e) = self.sync_collection(descriptor).await {
                error!(symbol = %descriptor.symbol, "Collection sync failed: {}", e);
            }

            // Marketplace rate limit: space out per-symbol requests.
            sleep(self.symbol_delay).await;
        }

        Ok(())
    }

    async fn sync_collection(&self, descriptor: &CollectionDescriptor) -> Result<(), AppError> {
        let stats = self.magiceden.collection_stats(&descriptor.symbol).await?;

        if let Some(previous) = self.collections.find_by_symbol(&stats.symbol).await? {
            if let Some(change) =
                FloorChange::detect(descriptor, previous.floor_price, stats.floor_price)
            {
                info!(
                    symbol = %descriptor.symbol,
                    "Floor price {} from {} to {}",
                    change.direction(),
                    change.old_floor_price,
                    change.new_floor_price
                );
                if let Err(e) = self.alerts.send_floor_change(&change).await {
                    error!(symbol = %descriptor.symbol, "Notification dispatch failed: {}", e);
                }
            }
        }

        // Refresh the record whether or not the floor moved.
        self.collections
            .upsert(&UpsertCollection {
                symbol: stats.symbol.clone(),
                name: descriptor.name.clone(),
                sort_order: descriptor.sort_order,
                image_url: descriptor.image_url.clone(),
                marketplace_url: descriptor.marketplace_url.clone(),
                color: descriptor.color,
                floor_price: stats.floor_price,
                listed_count: stats.listed_count,
                avg_price_24hr: stats.avg_price_24hr.round() as i64,
                volume_all: stats.volume_all.round() as i64,
                fetched_at: Utc::now(),
            })
            .await
    }

    /// One exchange poll cycle; upserts only, never notifies.
    pub async fn sync_tickers(&self) -> Result<(), AppError> {
        info!("Syncing {} exchange tickers", self.watchlist.tickers.len());

        for descriptor in &self.watchlist.tickers {
            if let Err(e) = self.sync_ticker(descriptor).await {
                error!(symbol = %descriptor.symbol, "Ticker sync failed: {}", e);
            }
        }

        Ok(())
    }

    async fn sync_ticker(&self, descriptor: &TickerDescriptor) -> Result<(), AppError> {
        let quote = self.binance.ticker_price(&descriptor.symbol).await?;
        let price = parse_price_units(&quote.price)?;

        self.tickers
            .upsert(&UpsertTicker {
                symbol: descriptor.symbol.clone(),
                name: descriptor.name.clone(),
                sign: descriptor.sign.clone(),
                price,
                fetched_at: Utc::now(),
            })
            .await
    }
}

pub struct CollectionSyncJob {
    sync: Arc<SyncService>,
}

impl CollectionSyncJob {
    pub fn new(sync: Arc<SyncService>) -> Self {
        Self { sync }
    }
}

#[async_trait]
impl Job for CollectionSyncJob {
    fn id(&self) -> &str {
        "magiceden"
    }

    async fn run(&self) -> Result<(), AppError> {
        self.sync.sync_collections().await
    }
}

pub struct TickerSyncJob {
    sync: Arc<SyncService>,
}

impl TickerSyncJob {
    pub fn new(sync: Arc<SyncService>) -> Self {
        Self { sync }
    }
}

#[async_trait]
impl Job for TickerSyncJob {
    fn id(&self) -> &str {
        "binance"
    }

    async fn run(&self) -> Result<(), AppError> {
        self.sync.sync_tickers().await
    }
}
