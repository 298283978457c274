use axum::{Router, routing::get};
use crate::{AppState, controllers::market_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/prices", get(market_controller::get_prices))
        .route("/api/supported-currencies", get(market_controller::get_supported_currencies))
}
