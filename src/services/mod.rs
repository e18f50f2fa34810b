pub mod alert_service;
pub mod binance;
pub mod collection_store;
pub mod magiceden;
pub mod scheduler_service;
pub mod sync_service;
pub mod ticker_store;

pub use alert_service::AlertService;
pub use binance::{BinanceClient, TickerQuote};
pub use collection_store::{CollectionStore, PgCollectionStore};
pub use magiceden::{CollectionStats, MagicEdenClient};
pub use scheduler_service::{Job, Scheduler};
pub use sync_service::{CollectionSyncJob, SyncService, TickerSyncJob};
pub use ticker_store::{PgTickerStore, TickerStore};
