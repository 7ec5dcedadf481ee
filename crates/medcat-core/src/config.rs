use crate::app_config::CrawlerConfig;
use crate::ConfigError;

pub const DEFAULT_SITEMAP_INDEX_URL: &str = "https://nhathuoclongchau.com.vn/sitemap.xml";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

/// Load crawler configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_crawler_config() -> Result<CrawlerConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_crawler_config_from_env()
}

/// Load crawler configuration from environment variables already in the process.
///
/// Unlike [`load_crawler_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_crawler_config_from_env() -> Result<CrawlerConfig, ConfigError> {
    build_crawler_config(|key| std::env::var(key))
}

/// Build crawler configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent variables take their documented default.
fn build_crawler_config<F>(lookup: F) -> Result<CrawlerConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let sitemap_index_url = or_default("MEDCAT_SITEMAP_INDEX_URL", DEFAULT_SITEMAP_INDEX_URL);
    validate_http_url("MEDCAT_SITEMAP_INDEX_URL", &sitemap_index_url)?;

    let request_timeout_secs = parse_u64("MEDCAT_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MEDCAT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }
    let request_delay_ms = parse_u64("MEDCAT_REQUEST_DELAY_MS", "500")?;
    let user_agent = or_default("MEDCAT_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("MEDCAT_ACCEPT_LANGUAGE", "vi,en;q=0.9");
    let log_level = or_default("MEDCAT_LOG_LEVEL", "info");

    Ok(CrawlerConfig {
        sitemap_index_url,
        request_timeout_secs,
        request_delay_ms,
        user_agent,
        accept_language,
        log_level,
    })
}

/// Rejects values that cannot be a sitemap location: empty strings and
/// anything without an `http://` or `https://` scheme.
fn validate_http_url(var: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "value must not be empty".to_string(),
        });
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{trimmed}\" is not an http(s) URL"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
