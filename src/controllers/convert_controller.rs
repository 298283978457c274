use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppError,
    extract::{ApiQuery, required},
    models::Conversion,
    services::conversion_service,
};

#[derive(Deserialize)]
pub struct ConvertQuery {
    pub from_coin: Option<String>,
    pub to_currency: Option<String>,
    pub amount: Option<f64>,
}

// GET /api/convert?from_coin=bitcoin&to_currency=usd&amount=2.5
pub async fn get_convert(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ConvertQuery>,
) -> Response {
    match convert(&state, q).await {
        Ok(conversion) => Json(conversion).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn convert(state: &AppState, q: ConvertQuery) -> Result<Conversion, AppError> {
    let from_coin = required(q.from_coin, "from_coin")?;
    let to_currency = required(q.to_currency, "to_currency")?;
    let amount = q.amount.unwrap_or(1.0);

    conversion_service::convert(state, &from_coin, &to_currency, amount).await
}
