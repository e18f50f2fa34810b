pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Settings;
use crate::services::{CollectionStore, TickerStore};
use std::sync::Arc;

/// Shared state handed to the axum handlers. All mutable state lives in
/// the persisted stores; requests share nothing in memory.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub collections: Arc<dyn CollectionStore>,
    pub tickers: Arc<dyn TickerStore>,
}
