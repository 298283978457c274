use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::AppError, models::RawArticle};

use super::ports::NewsSource;

#[derive(Clone)]
pub struct NewsApiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(http: Client, base_url: &str, api_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn latest_articles(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<RawArticle>, AppError> {
        let url = format!("{}/everything", self.base_url);
        let page_size = page_size.to_string();

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", query),
                ("apiKey", self.api_key.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::upstream("fetch news", e))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::upstream("fetch news", format!("{status} {body}")));
        }

        let payload = res
            .json::<EverythingResponse>()
            .await
            .map_err(|e| AppError::upstream("fetch news", e))?;

        Ok(payload.articles)
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}
