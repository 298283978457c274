pub mod alert;
pub mod conversion;
pub mod news;

pub use alert::{AlertId, AlertRecord};
pub use conversion::Conversion;
pub use news::{NewsArticle, RawArticle};
