use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversion {
    pub from_coin: String,
    pub to_currency: String,
    pub amount: f64,
    pub conversion_rate: f64,
    pub converted_amount: f64,
}
