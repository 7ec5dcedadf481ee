use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed sitemap: {reason}")]
    MalformedSitemap { reason: String },

    #[error("payload not found: page has no non-empty __NEXT_DATA__ script")]
    PayloadNotFound,

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no product data in payload for {url}")]
    MissingProduct { url: String },
}

impl ScraperError {
    /// `true` for pages that were fetched fine but simply are not product
    /// pages. The crawl reports these as skipped rather than failed.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ScraperError::PayloadNotFound | ScraperError::MissingProduct { .. }
        )
    }
}
