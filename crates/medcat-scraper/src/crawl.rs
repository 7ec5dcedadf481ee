//! Crawl orchestration: sitemap walk → fetch → payload → registry → record.
//!
//! One URL is processed at a time. A failing URL is recorded in the report
//! and the walk moves on; nothing short of the walk running dry (or the
//! limit) ends a crawl.

use std::fmt;

use chrono::Utc;
use medcat_core::{CategoryRecord, ProductRecord};

use crate::client::CatalogClient;
use crate::dates::DayOffsetSource;
use crate::error::ScraperError;
use crate::normalize::normalize_product;
use crate::payload::extract_next_data;
use crate::registry::CategoryRegistry;
use crate::sitemap::SitemapWalker;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub sitemap_index_url: String,
    /// Maximum number of product URLs to process. `None` walks everything.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStatus {
    Ok,
    Skip,
    Err,
}

impl CrawlStatus {
    /// Fixed-width tag used in status lines.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            CrawlStatus::Ok => "OK ",
            CrawlStatus::Skip => "SKIP",
            CrawlStatus::Err => "ERR",
        }
    }
}

/// Outcome of one processed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlEntry {
    pub url: String,
    pub status: CrawlStatus,
    /// Skip reason or error text; `None` for `Ok`.
    pub detail: Option<String>,
}

impl CrawlEntry {
    fn ok(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            status: CrawlStatus::Ok,
            detail: None,
        }
    }

    fn from_error(url: &str, error: &ScraperError) -> Self {
        if error.is_skip() {
            Self {
                url: url.to_owned(),
                status: CrawlStatus::Skip,
                detail: Some(skip_reason(error).to_owned()),
            }
        } else {
            Self {
                url: url.to_owned(),
                status: CrawlStatus::Err,
                detail: Some(error.to_string()),
            }
        }
    }
}

/// `[OK ] url`, `[SKIP] url (reason)` or `[ERR] url -> error`.
impl fmt::Display for CrawlEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.tag(), self.url)?;
        match (self.status, self.detail.as_deref()) {
            (CrawlStatus::Skip, Some(reason)) => write!(f, " ({reason})"),
            (CrawlStatus::Err, Some(error)) => write!(f, " -> {error}"),
            _ => Ok(()),
        }
    }
}

fn skip_reason(error: &ScraperError) -> &'static str {
    match error {
        ScraperError::MissingProduct { .. } => "no product data",
        _ => "no page payload",
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl CrawlSummary {
    #[must_use]
    pub fn processed(&self) -> usize {
        self.ok + self.skipped + self.failed
    }
}

/// Everything one crawl produced.
#[derive(Debug, Default, Clone)]
pub struct CrawlReport {
    pub products: Vec<ProductRecord>,
    /// Sorted by slug.
    pub categories: Vec<CategoryRecord>,
    /// One entry per processed URL, in processing order.
    pub entries: Vec<CrawlEntry>,
}

impl CrawlReport {
    #[must_use]
    pub fn summary(&self) -> CrawlSummary {
        let mut summary = CrawlSummary::default();
        for entry in &self.entries {
            match entry.status {
                CrawlStatus::Ok => summary.ok += 1,
                CrawlStatus::Skip => summary.skipped += 1,
                CrawlStatus::Err => summary.failed += 1,
            }
        }
        summary
    }
}

/// Crawls the catalog reachable from `options.sitemap_index_url`.
///
/// Every processed URL is reported to `on_status` as soon as it is done and
/// recorded in the returned report. The category registry is created fresh
/// for each call.
pub async fn crawl_catalog<S, F>(
    client: &CatalogClient,
    options: &CrawlOptions,
    dates: &mut S,
    mut on_status: F,
) -> CrawlReport
where
    S: DayOffsetSource + ?Sized,
    F: FnMut(&CrawlEntry),
{
    let mut registry = CategoryRegistry::new();
    let mut products = Vec::new();
    let mut entries = Vec::new();
    let mut walker = SitemapWalker::new(client, &options.sitemap_index_url);

    tracing::info!(
        index = %options.sitemap_index_url,
        limit = ?options.limit,
        "starting catalog crawl"
    );

    while options.limit.is_none_or(|limit| entries.len() < limit) {
        let Some(url) = walker.next_url().await else {
            break;
        };

        let entry = match process_url(client, &url, &mut registry, dates).await {
            Ok(record) => {
                products.push(record);
                CrawlEntry::ok(&url)
            }
            Err(e) => {
                if e.is_skip() {
                    tracing::debug!(url = %url, reason = %e, "skipping page");
                } else {
                    tracing::warn!(url = %url, error = %e, "failed to process page");
                }
                CrawlEntry::from_error(&url, &e)
            }
        };

        on_status(&entry);
        entries.push(entry);
    }

    let report = CrawlReport {
        products,
        categories: registry.into_sorted_records(),
        entries,
    };
    let summary = report.summary();
    tracing::info!(
        ok = summary.ok,
        skipped = summary.skipped,
        failed = summary.failed,
        categories = report.categories.len(),
        "catalog crawl finished"
    );
    report
}

async fn process_url<S: DayOffsetSource + ?Sized>(
    client: &CatalogClient,
    url: &str,
    registry: &mut CategoryRegistry,
    dates: &mut S,
) -> Result<ProductRecord, ScraperError> {
    let html = client.fetch_text(url).await?;
    let page = extract_next_data(&html, url)?.props.page_props;
    let product = page.product.as_ref().ok_or_else(|| ScraperError::MissingProduct {
        url: url.to_owned(),
    })?;
    registry.register(&product.categories);
    normalize_product(&page, url, Utc::now(), dates)
}
