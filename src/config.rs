use std::{env, net::IpAddr, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is missing (set it in the environment or .env)")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,

    pub coingecko_api_key: String,
    pub coingecko_base_url: String,

    pub news_api_key: String,
    pub news_api_base_url: String,

    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub twilio_base_url: String,

    pub alert_poll_interval: Duration,
    pub alert_quote_currency: String,

    pub conversion_cache_capacity: usize,
    pub conversion_cache_ttl: Duration,

    pub http_timeout: Duration,
}

pub fn load() -> Result<Settings, ConfigError> {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    Settings::from_lookup(|key| env::var(key).ok())
}

impl Settings {
    /// Builds settings from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let number = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match get(key) {
                None => Ok(default),
                Some(v) => v
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid { key, value: v }),
            }
        };

        let host = match get("HOST") {
            None => IpAddr::from([127, 0, 0, 1]),
            Some(v) => v
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::Invalid { key: "HOST", value: v })?,
        };

        let port = number("PORT", 8000)?;
        let port = u16::try_from(port).map_err(|_| ConfigError::Invalid {
            key: "PORT",
            value: port.to_string(),
        })?;

        let poll_secs = number("ALERT_POLL_INTERVAL_SECS", 30)?;
        if poll_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "ALERT_POLL_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }

        let capacity = number("CONVERSION_CACHE_CAPACITY", 100)?;
        if capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "CONVERSION_CACHE_CAPACITY",
                value: "0".to_string(),
            });
        }

        Ok(Settings {
            host,
            port,

            coingecko_api_key: required("COINGECKO_API_KEY")?,
            coingecko_base_url: get("COINGECKO_BASE_URL")
                .unwrap_or_else(|| "https://api.coingecko.com/api/v3".to_string()),

            news_api_key: required("NEWS_API_KEY")?,
            news_api_base_url: get("NEWS_API_BASE_URL")
                .unwrap_or_else(|| "https://newsapi.org/v2".to_string()),

            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_auth_token: required("TWILIO_AUTH_TOKEN")?,
            twilio_phone_number: required("TWILIO_PHONE_NUMBER")?,
            twilio_base_url: get("TWILIO_BASE_URL")
                .unwrap_or_else(|| "https://api.twilio.com".to_string()),

            alert_poll_interval: Duration::from_secs(poll_secs),
            alert_quote_currency: get("ALERT_QUOTE_CURRENCY")
                .map(|c| c.trim().to_lowercase())
                .unwrap_or_else(|| "usd".to_string()),

            conversion_cache_capacity: capacity as usize,
            conversion_cache_ttl: Duration::from_secs(number("CONVERSION_CACHE_TTL_SECS", 60)?),

            http_timeout: Duration::from_secs(number("HTTP_TIMEOUT_SECS", 10)?),
        })
    }
}
