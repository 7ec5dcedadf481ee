mod crawl;
mod export;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "medcat")]
#[command(about = "Crawl the Long Châu pharmacy catalog into importable JSON/CSV")]
struct Cli {
    /// Maximum number of product URLs to process
    #[arg(long)]
    limit: Option<usize>,

    /// Product JSON destination; an empty value disables the write
    #[arg(long, default_value = crawl::DEFAULT_PRODUCTS_OUTPUT)]
    output: String,

    /// Category JSON destination; an empty value disables the write
    #[arg(long, default_value = crawl::DEFAULT_CATEGORIES_OUTPUT)]
    categories_output: String,

    /// Also write products as CSV to this path
    #[arg(long)]
    csv: Option<String>,

    /// Crawl without writing products (refreshes categories only)
    #[arg(long)]
    skip_products: bool,

    /// JSON indent width; 0 or negative writes compact JSON
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    indent: i32,

    /// Delay after every response in milliseconds (overrides MEDCAT_REQUEST_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Sitemap index URL (overrides MEDCAT_SITEMAP_INDEX_URL)
    #[arg(long)]
    sitemap_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = medcat_core::load_crawler_config()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(delay_ms) = cli.delay_ms {
        config.request_delay_ms = delay_ms;
    }
    if let Some(url) = cli.sitemap_url.as_deref() {
        config.sitemap_index_url = url.to_owned();
    }

    crawl::run_crawl(&cli, &config).await
}
