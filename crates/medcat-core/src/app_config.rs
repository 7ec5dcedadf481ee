/// Runtime settings for one crawl invocation.
///
/// Built from environment variables by [`crate::load_crawler_config`]; the CLI
/// may override individual fields from its own flags before starting a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    /// Root sitemap index, e.g. `https://nhathuoclongchau.com.vn/sitemap.xml`.
    pub sitemap_index_url: String,
    pub request_timeout_secs: u64,
    /// Sleep applied after every request that produced an HTTP response.
    pub request_delay_ms: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Fallback `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: String,
}
