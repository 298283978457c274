//! Library entrypoint for coinwire.
//!
//! `main.rs` only wires settings, logging and the listener; integration tests
//! under `tests/` build the same router around fake upstreams.

pub mod config;
pub mod error;
pub mod extract;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

use std::sync::Arc;

use services::{
    alert_registry::{AlertRegistry, InMemoryAlertRegistry},
    coingecko::CoinGeckoClient,
    conversion_cache::ConversionCache,
    newsapi::NewsApiClient,
    ports::{MarketData, NewsSource, Notifier},
    twilio::TwilioClient,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub market: Arc<dyn MarketData>,
    pub news: Arc<dyn NewsSource>,
    pub notifier: Arc<dyn Notifier>,
    pub alerts: Arc<dyn AlertRegistry>,
    pub conversion_cache: Arc<ConversionCache>,
}

impl AppState {
    /// State backed by the real HTTP clients, sharing one connection pool.
    pub fn from_settings(settings: config::Settings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(settings.http_timeout)
            .build()?;

        let market = CoinGeckoClient::new(
            http.clone(),
            &settings.coingecko_base_url,
            settings.coingecko_api_key.clone(),
        );
        let news = NewsApiClient::new(
            http.clone(),
            &settings.news_api_base_url,
            settings.news_api_key.clone(),
        );
        let notifier = TwilioClient::new(
            http,
            &settings.twilio_base_url,
            settings.twilio_account_sid.clone(),
            settings.twilio_auth_token.clone(),
            settings.twilio_phone_number.clone(),
        );

        Ok(Self::with_services(
            settings,
            Arc::new(market),
            Arc::new(news),
            Arc::new(notifier),
        ))
    }

    pub fn with_services(
        settings: config::Settings,
        market: Arc<dyn MarketData>,
        news: Arc<dyn NewsSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let conversion_cache = Arc::new(ConversionCache::new(
            settings.conversion_cache_capacity,
            settings.conversion_cache_ttl,
        ));

        Self {
            settings,
            market,
            news,
            notifier,
            alerts: Arc::new(InMemoryAlertRegistry::new()),
            conversion_cache,
        }
    }
}
