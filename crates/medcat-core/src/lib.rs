pub mod app_config;
pub mod categories;
pub mod config;
pub mod error;
pub mod identity;
pub mod products;

pub use app_config::CrawlerConfig;
pub use categories::CategoryRecord;
pub use config::{load_crawler_config, load_crawler_config_from_env};
pub use error::ConfigError;
pub use identity::{hash_category_id, hash_url_id, slugify};
pub use products::{ProductRecord, PRODUCT_FIELDS};
