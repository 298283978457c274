#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::Router;
use http_body_util::BodyExt;
use coinwire::{
    AppState, config,
    error::AppError,
    models::RawArticle,
    routes,
    services::ports::{MarketData, NewsSource, Notifier},
};

#[derive(Default)]
pub struct FakeMarket {
    rates: Mutex<HashMap<(String, String), f64>>,
    pub listing: Mutex<serde_json::Value>,
    pub fail: AtomicBool,
    pub spot_calls: AtomicUsize,
}

impl FakeMarket {
    pub fn set_rate(&self, coin: &str, currency: &str, rate: f64) {
        self.rates
            .lock()
            .unwrap()
            .insert((coin.to_string(), currency.to_string()), rate);
    }

    pub fn spot_calls(&self) -> usize {
        self.spot_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn top_markets(&self, _vs: &str, limit: u32) -> Result<serde_json::Value, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::upstream("fetch market listing", "connection refused"));
        }
        let listing = self.listing.lock().unwrap().clone();
        assert_eq!(limit, 10);
        Ok(listing)
    }

    async fn spot_price(&self, coin: &str, currency: &str) -> Result<Option<f64>, AppError> {
        self.spot_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::upstream("fetch conversion rate", "connection refused"));
        }
        Ok(self
            .rates
            .lock()
            .unwrap()
            .get(&(coin.to_string(), currency.to_string()))
            .copied())
    }

    async fn supported_currencies(&self) -> Result<Vec<String>, AppError> {
        Ok(vec!["usd".to_string(), "eur".to_string(), "btc".to_string()])
    }
}

#[derive(Default)]
pub struct FakeNews {
    pub articles: Mutex<Vec<RawArticle>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl NewsSource for FakeNews {
    async fn latest_articles(&self, _query: &str, page_size: u32) -> Result<Vec<RawArticle>, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::upstream("fetch news", "401 Unauthorized"));
        }
        let articles = self.articles.lock().unwrap().clone();
        Ok(articles.into_iter().take(page_size as usize).collect())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl FakeNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::upstream("send SMS", "invalid number"));
        }
        self.sent.lock().unwrap().push((to.to_string(), body.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub market: Arc<FakeMarket>,
    pub news: Arc<FakeNews>,
    pub notifier: Arc<FakeNotifier>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        routes::app(self.state.clone())
    }
}

pub fn test_settings(overrides: &[(&str, &str)]) -> config::Settings {
    let mut vars: HashMap<String, String> = [
        ("COINGECKO_API_KEY", "cg-test"),
        ("NEWS_API_KEY", "news-test"),
        ("TWILIO_ACCOUNT_SID", "AC-test"),
        ("TWILIO_AUTH_TOKEN", "token-test"),
        ("TWILIO_PHONE_NUMBER", "+15550000000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }

    config::Settings::from_lookup(|k| vars.get(k).cloned()).expect("test settings")
}

pub fn test_app(overrides: &[(&str, &str)]) -> TestApp {
    let market = Arc::new(FakeMarket::default());
    let news = Arc::new(FakeNews::default());
    let notifier = Arc::new(FakeNotifier::default());

    let state = AppState::with_services(
        test_settings(overrides),
        market.clone(),
        news.clone(),
        notifier.clone(),
    );

    TestApp {
        state,
        market,
        news,
        notifier,
    }
}

pub async fn response_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
