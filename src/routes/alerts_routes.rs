use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::alerts_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/alerts",
            get(alerts_controller::get_alerts).delete(alerts_controller::delete_alerts),
        )
        .route("/api/set-alert", post(alerts_controller::post_set_alert))
}
