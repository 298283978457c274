use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::AppError;

use super::ports::MarketData;

const API_KEY_HEADER: &str = "x-cg-pro-api-key";

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CoinGeckoClient {
    pub fn new(http: Client, base_url: &str, api_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .http
            .get(url)
            .header("accept", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::upstream(what, e))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::upstream(what, format!("{status} {body}")));
        }

        res.json::<T>().await.map_err(|e| AppError::upstream(what, e))
    }
}

#[async_trait]
impl MarketData for CoinGeckoClient {
    async fn top_markets(
        &self,
        vs_currency: &str,
        limit: u32,
    ) -> Result<serde_json::Value, AppError> {
        let per_page = limit.to_string();
        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", vs_currency),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
            ],
            "fetch market listing",
        )
        .await
    }

    async fn spot_price(&self, coin: &str, currency: &str) -> Result<Option<f64>, AppError> {
        let payload: SimplePriceResponse = self
            .get_json(
                "/simple/price",
                &[("ids", coin), ("vs_currencies", currency)],
                "fetch conversion rate",
            )
            .await?;

        Ok(rate_from(&payload, coin, currency))
    }

    async fn supported_currencies(&self) -> Result<Vec<String>, AppError> {
        self.get_json("/simple/supported_vs_currencies", &[], "fetch supported currencies")
            .await
    }
}

// { "bitcoin": { "usd": 60000.0 } }
pub type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

pub fn rate_from(payload: &SimplePriceResponse, coin: &str, currency: &str) -> Option<f64> {
    payload
        .get(coin)
        .and_then(|quotes| quotes.get(currency).copied().flatten())
}
