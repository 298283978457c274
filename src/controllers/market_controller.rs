use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{AppState, services::market_service};

// GET /api/prices
pub async fn get_prices(State(state): State<AppState>) -> Response {
    match market_service::top_markets(&state).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => e.into_response(),
    }
}

// GET /api/supported-currencies
pub async fn get_supported_currencies(State(state): State<AppState>) -> Response {
    match market_service::supported_currencies(&state).await {
        Ok(currencies) => Json(currencies).into_response(),
        Err(e) => e.into_response(),
    }
}
