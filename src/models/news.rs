use serde::{Deserialize, Serialize};

/// Article shape returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsArticle {
    pub url: String,
    pub title: String,

    #[serde(rename = "publishedAt")]
    pub published_at: String,

    pub description: String,

    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
}

/// Article as delivered by the news provider; every field may be absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    pub url: Option<String>,
    pub title: Option<String>,

    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,

    pub description: Option<String>,

    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
}
