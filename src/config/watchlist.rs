use crate::config::{AlertSettings, Settings};

/// A tracked Magic Eden collection. `webhooks` holds the resolved
/// notification URLs; collections with `sort_order == 0` are excluded
/// from the dashboard floor-price total.
#[derive(Debug, Clone)]
pub struct CollectionDescriptor {
    pub symbol: String,
    pub name: String,
    pub sort_order: i32,
    pub image_url: String,
    pub marketplace_url: String,
    pub color: i32,
    pub webhooks: Vec<String>,
}

/// A tracked Binance trading pair.
#[derive(Debug, Clone)]
pub struct TickerDescriptor {
    pub symbol: String,
    pub name: String,
    pub sign: String,
}

#[derive(Debug, Clone)]
pub struct Watchlist {
    pub collections: Vec<CollectionDescriptor>,
    pub tickers: Vec<TickerDescriptor>,
}

impl Watchlist {
    pub fn from_settings(settings: &Settings) -> Self {
        Watchlist {
            collections: collections(&settings.alerts),
            tickers: tickers(),
        }
    }
}

fn resolve(targets: &[&Option<String>]) -> Vec<String> {
    targets.iter().filter_map(|url| (*url).clone()).collect()
}

fn collections(alerts: &AlertSettings) -> Vec<CollectionDescriptor> {
    vec![
        CollectionDescriptor {
            symbol: "tomorrowland_winter".to_string(),
            name: "A letter from the Universe (Winter)".to_string(),
            sort_order: 1,
            image_url: "https://pbs.twimg.com/media/FZar7ZcUsAAw0wa.jpg".to_string(),
            marketplace_url: "https://magiceden.io/marketplace/tomorrowland_winter".to_string(),
            color: 7608595,
            webhooks: resolve(&[&alerts.letter_webhook_url, &alerts.broadcast_webhook_url]),
        },
        CollectionDescriptor {
            symbol: "the_reflection_of_love".to_string(),
            name: "The reflection of Love".to_string(),
            sort_order: 2,
            image_url: "https://moon.ly/uploads/nft/e8141974-650f-4c59-80b0-3bb9397ae049.gif"
                .to_string(),
            marketplace_url: "https://magiceden.io/marketplace/the_reflection_of_love".to_string(),
            color: 1274905,
            webhooks: resolve(&[&alerts.reflection_webhook_url, &alerts.broadcast_webhook_url]),
        },
        CollectionDescriptor {
            symbol: "tomorrowland_love_unity".to_string(),
            name: "The Symbol of Love and Unity".to_string(),
            sort_order: 3,
            image_url: "https://img-cdn.magiceden.dev/rs:fill:400:400:0:0/plain/https://bafybeidzsht5g3rtb2crlgildg3hrbt5mtuiw6eiakxj5ckhftvrqyjvbm.ipfs.nftstorage.link/".to_string(),
            marketplace_url: "https://magiceden.io/marketplace/tomorrowland_love_unity".to_string(),
            color: 1643380,
            webhooks: resolve(&[&alerts.symbol_webhook_url, &alerts.broadcast_webhook_url]),
        },
        CollectionDescriptor {
            symbol: "the_golden_auric".to_string(),
            name: "The Golden Auric".to_string(),
            sort_order: 0,
            image_url: "https://img-cdn.magiceden.dev/rs:fill:400:400:0:0/plain/https://creator-hub-prod.s3.us-east-2.amazonaws.com/the_golden_auric_pfp_1682607788127.png".to_string(),
            marketplace_url: "https://magiceden.io/marketplace/the_golden_auric".to_string(),
            color: 16777215,
            webhooks: resolve(&[&alerts.auric_webhook_url, &alerts.broadcast_webhook_url]),
        },
        CollectionDescriptor {
            symbol: "ghost_kid_dao".to_string(),
            name: "GhostKidDAO".to_string(),
            sort_order: 9999,
            image_url: "https://img-cdn.magiceden.dev/rs:fill:400:400:0:0/plain/https://creator-hub-prod.s3.us-east-2.amazonaws.com/ghost_kid_dao_pfp_1662325189064.gif".to_string(),
            marketplace_url: "https://magiceden.io/marketplace/ghost_kid_dao".to_string(),
            color: 16777215,
            webhooks: resolve(&[&alerts.ghost_webhook_url]),
        },
    ]
}

fn tickers() -> Vec<TickerDescriptor> {
    vec![
        TickerDescriptor {
            symbol: "SOLUSDT".to_string(),
            name: "USDT".to_string(),
            sign: "$".to_string(),
        },
        TickerDescriptor {
            symbol: "SOLEUR".to_string(),
            name: "Euro".to_string(),
            sign: "\u{20ac}".to_string(),
        },
        TickerDescriptor {
            symbol: "SOLGBP".to_string(),
            name: "GBP".to_string(),
            sign: "\u{a3}".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhooks_resolve_only_configured_urls() {
        let mut settings = Settings::default();
        settings.alerts.letter_webhook_url = Some("https://discord.test/letter".to_string());
        settings.alerts.broadcast_webhook_url = Some("https://discord.test/all".to_string());

        let watchlist = Watchlist::from_settings(&settings);

        let letter = &watchlist.collections[0];
        assert_eq!(letter.symbol, "tomorrowland_winter");
        assert_eq!(
            letter.webhooks,
            vec![
                "https://discord.test/letter".to_string(),
                "https://discord.test/all".to_string()
            ]
        );

        // No dedicated URL configured, only the broadcast channel remains.
        let reflection = &watchlist.collections[1];
        assert_eq!(
            reflection.webhooks,
            vec!["https://discord.test/all".to_string()]
        );

        // ghost_kid_dao never posts to the broadcast channel.
        let ghost = watchlist
            .collections
            .iter()
            .find(|c| c.symbol == "ghost_kid_dao")
            .unwrap();
        assert!(ghost.webhooks.is_empty());
    }

    #[test]
    fn exactly_one_collection_is_excluded_from_totals() {
        let watchlist = Watchlist::from_settings(&Settings::default());
        let excluded: Vec<_> = watchlist
            .collections
            .iter()
            .filter(|c| c.sort_order == 0)
            .collect();
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].symbol, "the_golden_auric");
    }
}
