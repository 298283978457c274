use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    error::AppError,
    extract::{ApiQuery, required},
    services::alerts_service,
};

#[derive(Deserialize)]
pub struct SetAlertQuery {
    pub phone: Option<String>,
    pub crypto: Option<String>,
    pub target_price: Option<f64>,
}

#[derive(Deserialize)]
pub struct DeleteAlertQuery {
    pub phone: Option<String>,
    pub crypto: Option<String>,
}

// GET /api/alerts
pub async fn get_alerts(State(state): State<AppState>) -> Response {
    Json(alerts_service::list_alerts(&state).await).into_response()
}

// POST /api/set-alert?phone=..&crypto=..&target_price=..
pub async fn post_set_alert(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<SetAlertQuery>,
) -> Response {
    match set_alert(&state, q).await {
        Ok(message) => Json(json!({ "message": message })).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn set_alert(state: &AppState, q: SetAlertQuery) -> Result<String, AppError> {
    let phone = required(q.phone, "phone")?;
    let crypto = required(q.crypto, "crypto")?;
    let target_price = required(q.target_price, "target_price")?;

    let record = alerts_service::create_alert(state, &phone, &crypto, target_price).await?;

    Ok(format!(
        "Alert set for {} at {} {}.",
        record.asset,
        record.target_price,
        state.settings.alert_quote_currency.to_uppercase()
    ))
}

// DELETE /api/alerts?phone=..&crypto=..
pub async fn delete_alerts(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<DeleteAlertQuery>,
) -> Response {
    let phone = match required(q.phone, "phone") {
        Ok(v) => v,
        Err(e) => return e.into_response(),
    };
    let crypto = match required(q.crypto, "crypto") {
        Ok(v) => v,
        Err(e) => return e.into_response(),
    };

    alerts_service::delete_alerts(&state, &phone, &crypto).await;

    Json(json!({ "message": "Alert deleted successfully." })).into_response()
}
