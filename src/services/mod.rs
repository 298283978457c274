pub mod ports;

pub mod coingecko;
pub mod newsapi;
pub mod twilio;

pub mod conversion_cache;
pub mod alert_registry;
pub mod alert_monitor;

pub mod alerts_service;
pub mod conversion_service;
pub mod market_service;
pub mod news_service;
