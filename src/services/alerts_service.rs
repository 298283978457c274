use crate::{
    AppState,
    error::AppError,
    models::AlertRecord,
    services::alert_monitor::{self, confirmation_message},
};

pub async fn list_alerts(state: &AppState) -> Vec<AlertRecord> {
    state.alerts.list().await
}

/// Registers the alert, sends the confirmation SMS before returning, and
/// starts its monitor. A failed confirmation rolls the registration back.
pub async fn create_alert(
    state: &AppState,
    phone: &str,
    crypto: &str,
    target_price: f64,
) -> Result<AlertRecord, AppError> {
    if phone.trim().is_empty() || crypto.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Invalid request: phone and crypto are required.".to_string(),
        ));
    }

    if !target_price.is_finite() {
        return Err(AppError::InvalidRequest(
            "Invalid request: target_price must be a number.".to_string(),
        ));
    }

    let handle = state
        .alerts
        .create(AlertRecord::new(phone, crypto, target_price))
        .await;
    let record = handle.record.clone();

    let body = confirmation_message(&record, &state.settings.alert_quote_currency);
    if let Err(e) = state.notifier.send_sms(&record.phone, &body).await {
        state.alerts.remove(record.id).await;
        return Err(e);
    }

    alert_monitor::spawn_price_alert_monitor(state, handle);

    Ok(record)
}

/// Removes matching alerts and stops their monitors.
pub async fn delete_alerts(state: &AppState, phone: &str, crypto: &str) -> usize {
    let removed = state.alerts.delete(phone, crypto).await;
    tracing::info!(removed, "alerts deleted");
    removed
}
