use axum::{Router, routing::get};
use crate::{AppState, controllers::convert_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/api/convert", get(convert_controller::get_convert))
}
