use crate::error::AppError;
use reqwest::Client;
use serde::Deserialize;

/// Stats payload returned by `GET /v2/collections/{symbol}/stats`.
/// Prices are lamports. `avgPrice24hr` and `volumeAll` are missing for
/// collections without recent activity and default to zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub symbol: String,
    pub floor_price: i64,
    pub listed_count: i64,
    #[serde(default)]
    pub avg_price_24hr: f64,
    #[serde(default)]
    pub volume_all: f64,
}

#[derive(Debug, Clone)]
pub struct MagicEdenClient {
    client: Client,
    base_url: String,
}

impl MagicEdenClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn collection_stats(&self, symbol: &str) -> Result<CollectionStats, AppError> {
        let url = format!("{}/v2/collections/{}/stats", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Magic Eden request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Magic Eden returned status {} for {}",
                response.status(),
                symbol
            )));
        }

        response
            .json::<CollectionStats>()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Invalid stats response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_collection_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/ghost_kid_dao/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "symbol": "ghost_kid_dao",
                "floorPrice": 1_500_000_000i64,
                "listedCount": 42,
                "avgPrice24hr": 1_250_000_000.5,
                "volumeAll": 9_000_000_000.0
            })))
            .mount(&server)
            .await;

        let client = MagicEdenClient::new(server.uri());
        let stats = client.collection_stats("ghost_kid_dao").await.unwrap();
        assert_eq!(stats.symbol, "ghost_kid_dao");
        assert_eq!(stats.floor_price, 1_500_000_000);
        assert_eq!(stats.listed_count, 42);
        assert_eq!(stats.avg_price_24hr, 1_250_000_000.5);
    }

    #[tokio::test]
    async fn missing_average_price_defaults_to_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/tomorrowland_winter/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "symbol": "tomorrowland_winter",
                "floorPrice": 72_000_000_000i64,
                "listedCount": 7
            })))
            .mount(&server)
            .await;

        let client = MagicEdenClient::new(server.uri());
        let stats = client
            .collection_stats("tomorrowland_winter")
            .await
            .unwrap();
        assert_eq!(stats.avg_price_24hr, 0.0);
        assert_eq!(stats.volume_all, 0.0);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/unknown/stats"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = MagicEdenClient::new(server.uri());
        assert!(client.collection_stats("unknown").await.is_err());
    }
}
