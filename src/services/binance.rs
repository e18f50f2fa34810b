use crate::error::AppError;
use crate::utils::TICKER_PRICE_SCALE;
use num_traits::ToPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Payload returned by `GET /api/v3/ticker/price`. The exchange emits
/// the price as a decimal string with 8 fractional digits.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerQuote {
    pub symbol: String,
    pub price: String,
}

#[derive(Debug, Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn ticker_price(&self, symbol: &str) -> Result<TickerQuote, AppError> {
        let url = format!("{}/api/v3/ticker/price?symbol={}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Binance request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Binance returned status {} for {}",
                response.status(),
                symbol
            )));
        }

        response
            .json::<TickerQuote>()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Invalid ticker response: {}", e)))
    }
}

/// Parse a decimal price string into integer 10^-8 units.
pub fn parse_price_units(price: &str) -> Result<i64, AppError> {
    let value = Decimal::from_str(price)
        .map_err(|e| AppError::ExternalApiError(format!("Unparseable price '{}': {}", price, e)))?;

    (value * Decimal::from(TICKER_PRICE_SCALE))
        .round()
        .to_i64()
        .ok_or_else(|| AppError::ExternalApiError(format!("Price '{}' out of range", price)))
}
