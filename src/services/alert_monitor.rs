use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::{
    AppState,
    error::AppError,
    models::AlertRecord,
    services::{
        alert_registry::AlertHandle,
        ports::{MarketData, Notifier},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum MonitorOutcome {
    /// Target reached and the fulfillment SMS went out.
    Fulfilled { price: f64 },
    /// Alert deleted (or server shutting down) before the target was reached.
    Cancelled,
    /// Price lookup or SMS failed; the user is not told.
    Failed(AppError),
}

pub struct PriceMonitor {
    pub market: Arc<dyn MarketData>,
    pub notifier: Arc<dyn Notifier>,
    pub interval: Duration,
    pub quote_currency: String,
}

pub fn spawn_price_alert_monitor(
    state: &AppState,
    handle: AlertHandle,
) -> JoinHandle<MonitorOutcome> {
    let monitor = PriceMonitor {
        market: state.market.clone(),
        notifier: state.notifier.clone(),
        interval: state.settings.alert_poll_interval,
        quote_currency: state.settings.alert_quote_currency.clone(),
    };

    tokio::spawn(async move {
        let AlertHandle { record, cancel } = handle;
        let alert_id = record.id;

        tracing::info!(
            alert_id,
            asset = %record.asset,
            target = record.target_price,
            "alert monitor started"
        );
        let outcome = monitor.run(&record, cancel).await;

        match &outcome {
            MonitorOutcome::Fulfilled { price } => {
                tracing::info!(alert_id, price, "alert fulfilled")
            }
            MonitorOutcome::Cancelled => tracing::info!(alert_id, "alert monitor cancelled"),
            MonitorOutcome::Failed(e) => {
                tracing::error!(alert_id, "alert monitor stopped: {}", e)
            }
        }

        outcome
    })
}

// Resolves once the flag flips to true or the registry drops the sender.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|c| *c).await;
}

impl PriceMonitor {
    /// Polls until the price reaches the target, the alert is cancelled, or a
    /// lookup fails. The first poll happens immediately.
    pub async fn run(
        &self,
        alert: &AlertRecord,
        mut cancel: watch::Receiver<bool>,
    ) -> MonitorOutcome {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancelled(&mut cancel) => return MonitorOutcome::Cancelled,
                _ = ticker.tick() => {}
            }

            let fetched = tokio::select! {
                biased;
                _ = cancelled(&mut cancel) => return MonitorOutcome::Cancelled,
                res = self.market.spot_price(&alert.asset, &self.quote_currency) => res,
            };

            let price = match fetched {
                Ok(Some(p)) => p,
                Ok(None) => {
                    return MonitorOutcome::Failed(AppError::DataNotFound(format!(
                        "Price for {} in {} not available.",
                        alert.asset, self.quote_currency
                    )));
                }
                Err(e) => return MonitorOutcome::Failed(e),
            };

            if price < alert.target_price {
                tracing::debug!(
                    alert_id = alert.id,
                    price,
                    target = alert.target_price,
                    "target not reached"
                );
                continue;
            }

            // deleted while the lookup was in flight. A delete that lands
            // while the SMS below is being sent can no longer stop it.
            if *cancel.borrow() {
                return MonitorOutcome::Cancelled;
            }

            let body = fulfillment_message(alert, price, &self.quote_currency);
            return match self.notifier.send_sms(&alert.phone, &body).await {
                Ok(()) => MonitorOutcome::Fulfilled { price },
                Err(e) => MonitorOutcome::Failed(e),
            };
        }
    }
}

pub fn confirmation_message(alert: &AlertRecord, quote_currency: &str) -> String {
    format!(
        "Alert set: we will text you when {} reaches {} {}.",
        alert.asset,
        alert.target_price,
        quote_currency.to_uppercase()
    )
}

pub fn fulfillment_message(alert: &AlertRecord, price: f64, quote_currency: &str) -> String {
    format!(
        "Price alert: {} is now {} {}, at or above your target of {}.",
        alert.asset,
        price,
        quote_currency.to_uppercase(),
        alert.target_price
    )
}
