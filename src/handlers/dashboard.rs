use crate::error::AppError;
use crate::models::{Collection, Ticker};
use crate::utils::{format_sol, lamports_to_sol, ticker_price_to_decimal};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::fmt::Write as _;
use tracing::error;

pub const DEFAULT_CURRENCY: &str = "SOLUSDT";

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub currency: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    match build_dashboard(&state, query).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Dashboard rendering failed: {}", e);
            error_page()
        }
    }
}

async fn build_dashboard(state: &AppState, query: DashboardQuery) -> Result<String, AppError> {
    let requested = query
        .currency
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let collections = state.collections.list().await?;
    let currencies = state.tickers.list().await?;
    let currency = state.tickers.find_by_symbol(&requested).await?;
    let last_fetched = state.collections.latest_fetched().await?;

    let total_floor_price: i64 = collections
        .iter()
        .filter(|c| c.counts_toward_total())
        .map(|c| c.floor_price)
        .sum();

    let page = render_dashboard(
        &collections,
        &currencies,
        currency.as_ref(),
        total_floor_price,
        last_fetched.as_ref(),
    )?;
    Ok(page)
}

/// Floor price converted into the selected quote currency.
fn convert(lamports: i64, currency: &Ticker) -> String {
    let amount = (lamports_to_sol(lamports) * ticker_price_to_decimal(currency.price)).round_dp(2);
    format!("{}{:.2}", currency.sign, amount)
}

fn render_dashboard(
    collections: &[Collection],
    currencies: &[Ticker],
    currency: Option<&Ticker>,
    total_floor_price: i64,
    last_fetched: Option<&Collection>,
) -> Result<String, std::fmt::Error> {
    let mut page = String::new();

    write!(
        page,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>nft.hardy.se</title></head><body>"
    )?;
    write!(page, "<h1>NFT floor prices</h1>")?;

    write!(page, "<p>Currency: ")?;
    for ticker in currencies {
        write!(
            page,
            "<a href=\"/?currency={}\">{}</a> ",
            ticker.symbol, ticker.name
        )?;
    }
    write!(page, "</p>")?;

    write!(
        page,
        "<table><tr><th></th><th>Collection</th><th>Floor price</th>\
         <th>Converted</th><th>Listed</th><th>24h average</th><th>Volume</th></tr>"
    )?;
    for collection in collections {
        let converted = currency
            .map(|c| convert(collection.floor_price, c))
            .unwrap_or_else(|| "-".to_string());
        write!(
            page,
            "<tr><td><img src=\"{}\" width=\"48\" height=\"48\"></td>\
             <td><a href=\"{}\">{}</a></td>\
             <td>{} SOL</td><td>{}</td><td>{}</td><td>{} SOL</td><td>{} SOL</td></tr>",
            collection.image_url,
            collection.marketplace_url,
            collection.name,
            format_sol(collection.floor_price),
            converted,
            collection.listed_count,
            format_sol(collection.avg_price_24hr),
            format_sol(collection.volume_all),
        )?;
    }
    write!(page, "</table>")?;

    let converted_total = currency
        .map(|c| convert(total_floor_price, c))
        .unwrap_or_else(|| "-".to_string());
    write!(
        page,
        "<p>Total floor price: {} SOL ({})</p>",
        format_sol(total_floor_price),
        converted_total
    )?;

    if let Some(latest) = last_fetched {
        write!(
            page,
            "<p><small>Last updated {}</small></p>",
            latest.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }

    write!(page, "</body></html>")?;
    Ok(page)
}

fn error_page() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<h1><center>Something went wrong</center></h1>"),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn collection(symbol: &str, sort_order: i32, floor_price: i64) -> Collection {
        Collection {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            sort_order,
            image_url: "https://example.com/img.png".to_string(),
            marketplace_url: format!("https://magiceden.io/marketplace/{}", symbol),
            color: 0,
            floor_price,
            listed_count: 5,
            avg_price_24hr: 0,
            volume_all: 0,
            fetched_at: Utc::now(),
        }
    }

    fn usdt_ticker() -> Ticker {
        Ticker {
            id: Uuid::new_v4(),
            symbol: "SOLUSDT".to_string(),
            name: "USDT".to_string(),
            sign: "$".to_string(),
            // 20.00000000 quoted as 10^-8 units
            price: 2_000_000_000,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn converts_floor_into_quote_currency() {
        // 1.5 SOL at $20 per SOL
        assert_eq!(convert(1_500_000_000, &usdt_ticker()), "$30.00");
    }

    #[test]
    fn renders_collections_and_total() {
        let collections = vec![
            collection("alpha", 1, 1_000_000_000),
            collection("beta", 2, 500_000_000),
        ];
        let tickers = vec![usdt_ticker()];

        let page = render_dashboard(
            &collections,
            &tickers,
            Some(&tickers[0]),
            1_500_000_000,
            Some(&collections[0]),
        )
        .unwrap();

        assert!(page.contains("alpha"));
        assert!(page.contains("beta"));
        assert!(page.contains("Total floor price: 1.5 SOL ($30.00)"));
        assert!(page.contains("/?currency=SOLUSDT"));
    }

    #[test]
    fn renders_without_a_matching_currency() {
        let collections = vec![collection("alpha", 1, 1_000_000_000)];
        let page = render_dashboard(&collections, &[], None, 1_000_000_000, None).unwrap();
        assert!(page.contains("1.0 SOL"));
        assert!(page.contains("-"));
    }
}
