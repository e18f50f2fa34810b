use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Html};

/// Kubernetes readiness probe: ready once both stores hold at least one
/// record, i.e. every poll routine has completed a first cycle.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Html<&'static str>) {
    let collections = state.collections.count().await.unwrap_or(0);
    let tickers = state.tickers.count().await.unwrap_or(0);

    if collections > 0 && tickers > 0 {
        (
            StatusCode::OK,
            Html("<h1><center>Readiness check completed</center></h1>"),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1><center>Readiness check failed</center></h1>"),
        )
    }
}
