use async_trait::async_trait;

use crate::{error::AppError, models::RawArticle};

// Upstream seams. The reqwest clients implement these in production; tests
// plug in fakes.

#[async_trait]
pub trait MarketData: Send + Sync {
    /// Top assets by market cap, passed through as the provider returns them.
    async fn top_markets(
        &self,
        vs_currency: &str,
        limit: u32,
    ) -> Result<serde_json::Value, AppError>;

    /// Spot price of `coin` in `currency`. `Ok(None)` when the provider does
    /// not know the pair.
    async fn spot_price(&self, coin: &str, currency: &str) -> Result<Option<f64>, AppError>;

    async fn supported_currencies(&self) -> Result<Vec<String>, AppError>;
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn latest_articles(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawArticle>, AppError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), AppError>;
}
