//! HTTP client shared by the sitemap walker and the product-page fetcher.

use std::time::Duration;

use reqwest::Client;

use medcat_core::CrawlerConfig;

use crate::error::ScraperError;
use crate::throttle::Throttle;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Throttled GET client for the storefront.
///
/// One `reqwest::Client` is reused for the whole crawl so connections and
/// TLS sessions are kept alive between requests. Every request that yields a
/// response is followed by the [`Throttle`] pause.
pub struct CatalogClient {
    client: Client,
    accept_language: String,
    throttle: Throttle,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the given request deadline, shared
    /// headers and post-response delay.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        accept_language: &str,
        throttle: Throttle,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        tracing::debug!(
            timeout_secs,
            delay_ms = throttle.delay().as_millis(),
            "built catalog client"
        );
        Ok(Self {
            client,
            accept_language: accept_language.to_owned(),
            throttle,
        })
    }

    /// Builds a client from the loaded crawler configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            &config.accept_language,
            Throttle::from_millis(config.request_delay_ms),
        )
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// The throttle pause runs after the body is read, for any status code.
    /// It is skipped only when no response was obtained at all.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: network, TLS or timeout failure, or the
    ///   body could not be read.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await;
        self.throttle.pause().await;

        tracing::debug!(url, status = status.as_u16(), "fetched");

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(body?)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
