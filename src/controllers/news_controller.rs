use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{AppState, services::news_service};

// GET /api/news
pub async fn get_news(State(state): State<AppState>) -> Response {
    match news_service::latest_news(&state).await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => e.into_response(),
    }
}
