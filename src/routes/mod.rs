use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{AppState, controllers::home_controller};

pub mod home_routes;
pub mod market_routes;
pub mod news_routes;
pub mod convert_routes;
pub mod alerts_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = market_routes::add_routes(router);
    let router = news_routes::add_routes(router);
    let router = convert_routes::add_routes(router);
    let router = alerts_routes::add_routes(router);

    // the dashboard frontend is served from another origin
    let cors = CorsLayer::very_permissive();

    router
        .fallback(home_controller::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
