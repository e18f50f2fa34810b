use crate::error::AppError;
use crate::models::FloorChange;
use crate::utils::format_sol;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

/// Delivers floor-change notifications to the Discord webhooks
/// configured for a collection.
#[derive(Debug, Clone)]
pub struct AlertService {
    client: Client,
}

impl AlertService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Discord embed describing the move: direction, old and new floor
    /// in SOL, collection metadata, and a direction graphic in the footer.
    pub fn floor_change_payload(change: &FloorChange) -> serde_json::Value {
        let direction = change.direction();
        let old_floor = format_sol(change.old_floor_price);
        let new_floor = format_sol(change.new_floor_price);

        json!({
            "username": "NFT",
            "avatar_url": "https://i.imgur.com/4M34hi2.png",
            "embeds": [
                {
                    "title": change.collection.name,
                    "url": change.collection.marketplace_url,
                    "description": format!(
                        "Has {} from {} SOL to {} SOL",
                        direction, old_floor, new_floor
                    ),
                    "color": change.collection.color,
                    "author": {
                        "name": "nft.hardy.se",
                        "url": "https://nft.hardy.se/"
                    },
                    "fields": [
                        {
                            "name": "Old floor Price",
                            "value": format!("{} SOL", old_floor),
                            "inline": true
                        },
                        {
                            "name": "New floor Price",
                            "value": format!("{} SOL", new_floor),
                            "inline": true
                        }
                    ],
                    "thumbnail": {
                        "url": change.collection.image_url
                    },
                    "footer": {
                        "text": format!("Floor price has {}", direction),
                        "icon_url": direction.icon_url()
                    }
                }
            ]
        })
    }

    /// POST the embed to every configured target. Per-target failures
    /// are logged and do not block the remaining targets.
    pub async fn send_floor_change(&self, change: &FloorChange) -> Result<(), AppError> {
        let targets = &change.collection.webhooks;
        if targets.is_empty() {
            debug!(
                symbol = %change.collection.symbol,
                "No webhooks configured, skipping notification"
            );
            return Ok(());
        }

        let payload = Self::floor_change_payload(change);
        debug!(payload = %payload, "Dispatching floor change notification");

        let mut success_count = 0;
        for target in targets {
            match self.deliver(target, &payload).await {
                Ok(()) => success_count += 1,
                Err(e) => warn!(
                    symbol = %change.collection.symbol,
                    "Webhook delivery failed: {}",
                    e
                ),
            }
        }

        if success_count == 0 {
            return Err(AppError::AlertError(
                "Failed to deliver notification to any webhook".to_string(),
            ));
        }

        info!(
            symbol = %change.collection.symbol,
            "Floor change notification delivered to {}/{} webhooks",
            success_count,
            targets.len()
        );
        Ok(())
    }

    async fn deliver(&self, target: &str, payload: &serde_json::Value) -> Result<(), AppError> {
        let response = self
            .client
            .post(target)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::AlertError(format!("Webhook request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AlertError(format!(
                "Webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectionDescriptor;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn change_with_webhooks(webhooks: Vec<String>) -> FloorChange {
        FloorChange {
            collection: CollectionDescriptor {
                symbol: "tomorrowland_winter".to_string(),
                name: "A letter from the Universe (Winter)".to_string(),
                sort_order: 1,
                image_url: "https://example.com/img.jpg".to_string(),
                marketplace_url: "https://magiceden.io/marketplace/tomorrowland_winter"
                    .to_string(),
                color: 7608595,
                webhooks,
            },
            old_floor_price: 1_000_000_000,
            new_floor_price: 1_500_000_000,
        }
    }

    #[test]
    fn payload_describes_the_move() {
        let change = change_with_webhooks(vec![]);
        let payload = AlertService::floor_change_payload(&change);

        let embed = &payload["embeds"][0];
        assert_eq!(
            embed["description"],
            "Has increased from 1.0 SOL to 1.5 SOL"
        );
        assert_eq!(embed["color"], 7608595);
        assert_eq!(embed["fields"][0]["value"], "1.0 SOL");
        assert_eq!(embed["fields"][1]["value"], "1.5 SOL");
        assert_eq!(embed["footer"]["text"], "Floor price has increased");
    }

    #[tokio::test]
    async fn delivers_to_every_target_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook/letter"))
            .and(body_partial_json(serde_json::json!({"username": "NFT"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/hook/all"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let change = change_with_webhooks(vec![
            format!("{}/hook/letter", server.uri()),
            format!("{}/hook/all", server.uri()),
        ]);

        AlertService::new().send_floor_change(&change).await.unwrap();
    }

    #[tokio::test]
    async fn one_failing_target_does_not_block_the_rest() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook/broken"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/hook/ok"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let change = change_with_webhooks(vec![
            format!("{}/hook/broken", server.uri()),
            format!("{}/hook/ok", server.uri()),
        ]);

        // One delivery succeeded, so the dispatch as a whole succeeds.
        AlertService::new().send_floor_change(&change).await.unwrap();
    }

    #[tokio::test]
    async fn all_targets_failing_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let change = change_with_webhooks(vec![format!("{}/hook", server.uri())]);
        assert!(AlertService::new().send_floor_change(&change).await.is_err());
    }
}
