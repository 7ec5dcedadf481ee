//! Locates and decodes the server-rendered page state embedded in a product
//! page as `<script id="__NEXT_DATA__" type="application/json">`.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::ScraperError;
use crate::types::NextData;

static NEXT_DATA_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script#__NEXT_DATA__").expect("valid __NEXT_DATA__ selector")
});

/// Returns the raw JSON text of the page-state script.
///
/// # Errors
///
/// Returns [`ScraperError::PayloadNotFound`] if the script element is
/// missing or contains only whitespace.
pub fn find_next_data_json(html: &str) -> Result<String, ScraperError> {
    let document = Html::parse_document(html);
    let script = document
        .select(&NEXT_DATA_SELECTOR)
        .next()
        .ok_or(ScraperError::PayloadNotFound)?;
    let json: String = script.text().collect();
    if json.trim().is_empty() {
        return Err(ScraperError::PayloadNotFound);
    }
    Ok(json)
}

/// Locates the page-state script and decodes it.
///
/// # Errors
///
/// - [`ScraperError::PayloadNotFound`]: no (non-empty) `__NEXT_DATA__` script.
/// - [`ScraperError::Deserialize`]: the script body is not a JSON object of
///   the expected shape.
pub fn extract_next_data(html: &str, url: &str) -> Result<NextData, ScraperError> {
    let json = find_next_data_json(html)?;
    serde_json::from_str::<NextData>(&json).map_err(|e| ScraperError::Deserialize {
        context: format!("__NEXT_DATA__ of {url}"),
        source: e,
    })
}
