use nft_floor_monitor::{
    config::{Settings, Watchlist},
    database::{create_database_if_not_exists, establish_connection, run_migrations},
    handlers,
    services::{
        AlertService, BinanceClient, CollectionStore, CollectionSyncJob, MagicEdenClient,
        PgCollectionStore, PgTickerStore, Scheduler, SyncService, TickerStore, TickerSyncJob,
    },
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting NFT floor monitor");

    let settings = Settings::new();

    create_database_if_not_exists(&settings.database.url).await?;
    let db_pool = establish_connection(&settings.database.url).await?;
    run_migrations(&db_pool).await?;

    let collections: Arc<dyn CollectionStore> = Arc::new(PgCollectionStore::new(db_pool.clone()));
    let tickers: Arc<dyn TickerStore> = Arc::new(PgTickerStore::new(db_pool.clone()));

    let watchlist = Watchlist::from_settings(&settings);
    let sync = Arc::new(SyncService::new(
        collections.clone(),
        tickers.clone(),
        MagicEdenClient::new(&settings.poller.magiceden_api_url),
        BinanceClient::new(&settings.poller.binance_api_url),
        AlertService::new(),
        watchlist,
        Duration::from_millis(settings.poller.symbol_delay_ms),
    ));

    // Marketplace polls fire on the round minute, exchange polls ten
    // seconds later, both every poll interval thereafter.
    let mut scheduler = Scheduler::new(db_pool.clone());
    scheduler.add_job(
        Arc::new(CollectionSyncJob::new(sync.clone())),
        settings.poller.poll_interval_seconds,
        0,
    );
    scheduler.add_job(
        Arc::new(TickerSyncJob::new(sync.clone())),
        settings.poller.poll_interval_seconds,
        10,
    );
    let job_handles = scheduler.spawn();

    let state = AppState {
        settings: settings.clone(),
        collections,
        tickers,
    };

    use axum::{routing::get, Router};
    use tower_http::trace::TraceLayer;

    let app = Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/readiness", get(handlers::health::readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", settings.api.host, settings.api.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dashboard available on {}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("Web server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    for handle in job_handles {
        handle.abort();
    }

    info!("Shutting down NFT floor monitor");
    Ok(())
}
