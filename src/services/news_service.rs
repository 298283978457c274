use crate::{
    AppState,
    error::AppError,
    models::{NewsArticle, RawArticle},
};

pub const NEWS_QUERY: &str = "cryptocurrency OR bitcoin OR ethereum";
pub const NEWS_PAGE_SIZE: u32 = 10;

/// Fills the fields the frontend always renders. Null and absent values are
/// treated alike.
pub fn reshape(raw: RawArticle) -> NewsArticle {
    NewsArticle {
        url: raw.url.unwrap_or_default(),
        title: raw.title.unwrap_or_else(|| "No title available".to_string()),
        published_at: raw.published_at.unwrap_or_default(),
        description: raw
            .description
            .unwrap_or_else(|| "No description available".to_string()),
        url_to_image: raw.url_to_image,
    }
}

pub async fn latest_news(state: &AppState) -> Result<Vec<NewsArticle>, AppError> {
    let articles = state
        .news
        .latest_articles(NEWS_QUERY, NEWS_PAGE_SIZE)
        .await?;

    Ok(articles.into_iter().map(reshape).collect())
}
