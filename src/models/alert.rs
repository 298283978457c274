use serde::Serialize;

pub type AlertId = u64;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertRecord {
    #[serde(skip)]
    pub id: AlertId,

    pub phone: String,

    // lowercased market-data id, e.g. "bitcoin"
    #[serde(rename = "crypto")]
    pub asset: String,

    pub target_price: f64,

    #[serde(skip)]
    pub created_at: i64,
}

impl AlertRecord {
    pub fn new(phone: &str, asset: &str, target_price: f64) -> Self {
        Self {
            id: 0,
            phone: phone.trim().to_string(),
            asset: asset.trim().to_lowercase(),
            target_price,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn matches(&self, phone: &str, asset: &str) -> bool {
        self.phone == phone.trim() && self.asset == asset.trim().to_lowercase()
    }
}
