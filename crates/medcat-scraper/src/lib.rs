pub mod client;
pub mod crawl;
pub mod dates;
pub mod error;
pub mod ingredients;
pub(crate) mod lenient;
pub mod normalize;
pub mod payload;
pub mod registry;
pub mod sanitize;
pub mod sitemap;
pub mod throttle;
pub mod types;

pub use client::CatalogClient;
pub use crawl::{crawl_catalog, CrawlEntry, CrawlOptions, CrawlReport, CrawlStatus, CrawlSummary};
pub use dates::{DayOffsetSource, LifecycleDates};
pub use error::ScraperError;
pub use ingredients::{classify_ingredients, IngredientBuckets};
pub use normalize::normalize_product;
pub use payload::extract_next_data;
pub use registry::CategoryRegistry;
pub use sanitize::sanitize_html;
pub use sitemap::{extract_loc_entries, is_product_url, SitemapEntry, SitemapWalker};
pub use throttle::Throttle;
pub use types::{NextData, PageProps};
