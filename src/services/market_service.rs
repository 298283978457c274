use crate::{AppState, error::AppError};

pub const TOP_MARKETS_CURRENCY: &str = "usd";
pub const TOP_MARKETS_LIMIT: u32 = 10;

/// Top assets by market cap, in the provider's own schema.
pub async fn top_markets(state: &AppState) -> Result<serde_json::Value, AppError> {
    state
        .market
        .top_markets(TOP_MARKETS_CURRENCY, TOP_MARKETS_LIMIT)
        .await
}

pub async fn supported_currencies(state: &AppState) -> Result<Vec<String>, AppError> {
    state.market.supported_currencies().await
}
