//! Product URL discovery through a two-level sitemap index.
//!
//! The index lists child sitemaps (`<sitemapindex><sitemap><loc>`), each
//! child lists pages (`<urlset><url><loc>`). Only page URLs that look like
//! product detail pages are yielded.

use std::collections::VecDeque;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::client::CatalogClient;
use crate::error::ScraperError;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Path segments that only ever hold editorial or service pages.
pub const NON_PRODUCT_SEGMENTS: [&str; 7] = [
    "bai-viet",
    "benh",
    "tin-tuc",
    "cam-nang",
    "khuyen-mai",
    "thu-vien",
    "dich-vu",
];

/// Which `<loc>` container to read from a sitemap document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapEntry {
    /// `<sitemap>` entries of a sitemap index.
    Sitemap,
    /// `<url>` entries of a leaf sitemap.
    Url,
}

impl SitemapEntry {
    fn tag(self) -> &'static [u8] {
        match self {
            SitemapEntry::Sitemap => b"sitemap",
            SitemapEntry::Url => b"url",
        }
    }
}

/// Lazily walks the sitemap index and yields candidate product URLs in
/// document order.
///
/// The index is fetched on the first call to [`Self::next_url`]; each child
/// sitemap is fetched only once the URLs of the previous child have been
/// consumed. A new walker always starts from scratch.
pub struct SitemapWalker<'a> {
    client: &'a CatalogClient,
    index_url: String,
    children: Option<VecDeque<String>>,
    pending: VecDeque<String>,
}

impl<'a> SitemapWalker<'a> {
    #[must_use]
    pub fn new(client: &'a CatalogClient, index_url: &str) -> Self {
        Self {
            client,
            index_url: index_url.to_owned(),
            children: None,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next product URL, or `None` once every child sitemap has
    /// been drained.
    ///
    /// Transport failures and malformed XML are logged and contribute no
    /// URLs; they never end the walk early for sibling sitemaps.
    pub async fn next_url(&mut self) -> Option<String> {
        loop {
            if let Some(url) = self.pending.pop_front() {
                return Some(url);
            }

            if self.children.is_none() {
                let children = self.load_entries(&self.index_url, SitemapEntry::Sitemap).await;
                tracing::info!(
                    index = %self.index_url,
                    child_sitemaps = children.len(),
                    "loaded sitemap index"
                );
                self.children = Some(children.into());
            }

            let child = self.children.as_mut()?.pop_front()?;
            let urls = self.load_entries(&child, SitemapEntry::Url).await;
            let total = urls.len();
            self.pending = urls.into_iter().filter(|u| is_product_url(u)).collect();
            tracing::debug!(
                sitemap = %child,
                total,
                products = self.pending.len(),
                "loaded child sitemap"
            );
        }
    }

    async fn load_entries(&self, url: &str, entry: SitemapEntry) -> Vec<String> {
        match self.client.fetch_text(url).await {
            Ok(xml) => extract_loc_entries(&xml, entry),
            Err(e) => {
                tracing::warn!(sitemap = url, error = %e, "failed to fetch sitemap; skipping");
                Vec::new()
            }
        }
    }
}

/// Extracts the `<loc>` text of every `entry` element directly under the
/// document root, in the sitemap namespace.
///
/// Returns an empty list when the document is not well-formed; a broken
/// sitemap never fails the caller.
#[must_use]
pub fn extract_loc_entries(xml: &str, entry: SitemapEntry) -> Vec<String> {
    match try_extract_loc_entries(xml, entry) {
        Ok(locs) => locs,
        Err(e) => {
            tracing::warn!(error = %e, "could not parse sitemap XML; treating as empty");
            Vec::new()
        }
    }
}

fn in_sitemap_ns(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == SITEMAP_NS.as_bytes())
}

fn try_extract_loc_entries(xml: &str, entry: SitemapEntry) -> Result<Vec<String>, ScraperError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let entry_tag = entry.tag();
    let mut locs = Vec::new();
    let mut depth = 0usize;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut text = String::new();

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(e) => {
                depth += 1;
                let local = e.local_name();
                let ours = in_sitemap_ns(&ns);
                if depth == 2 && ours && local.as_ref() == entry_tag {
                    in_entry = true;
                } else if depth == 3 && in_entry && ours && local.as_ref() == b"loc" {
                    in_loc = true;
                    text.clear();
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err(ScraperError::MalformedSitemap {
                        reason: "closing tag without an open element".to_owned(),
                    });
                }
                if depth == 3 && in_loc {
                    let loc = text.trim();
                    if !loc.is_empty() {
                        locs.push(loc.to_owned());
                    }
                    in_loc = false;
                } else if depth == 2 {
                    in_entry = false;
                }
                depth -= 1;
            }
            Event::Text(e) if in_loc => {
                text.push_str(&e.unescape()?);
            }
            Event::CData(e) if in_loc => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ScraperError::MalformedSitemap {
            reason: format!("document ended with {depth} unclosed element(s)"),
        });
    }

    Ok(locs)
}

/// Best-effort filter for product detail pages.
///
/// Accepts paths ending in `.html` with at least two `/` separators that do
/// not pass through any of [`NON_PRODUCT_SEGMENTS`].
#[must_use]
pub fn is_product_url(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    let path = parsed.path();
    if !path.ends_with(".html") {
        return false;
    }
    if NON_PRODUCT_SEGMENTS
        .iter()
        .any(|segment| path.contains(&format!("/{segment}/")))
    {
        return false;
    }
    path.matches('/').count() >= 2
}

#[cfg(test)]
#[path = "sitemap_test.rs"]
mod tests;
