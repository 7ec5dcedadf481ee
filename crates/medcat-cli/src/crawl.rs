//! The crawl command: run the catalog crawl, print one status line per URL,
//! then write the requested exports.

use std::path::PathBuf;

use anyhow::Context;
use medcat_core::CrawlerConfig;
use medcat_scraper::{crawl_catalog, CatalogClient, CrawlOptions, CrawlReport};

use crate::export::{write_json, write_products_csv};
use crate::Cli;

pub(crate) const DEFAULT_PRODUCTS_OUTPUT: &str = "longchau_products.json";
pub(crate) const DEFAULT_CATEGORIES_OUTPUT: &str = "longchau_categories.json";

pub(crate) const SKIP_CSV_NOTICE: &str =
    "Skipping CSV output because products export is disabled (--skip-products).";

/// Which files to write once the crawl is done. `None` disables a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportPlan {
    pub products: Option<PathBuf>,
    pub categories: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub skip_products: bool,
    pub indent: i32,
}

impl ExportPlan {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        Self {
            products: non_empty_path(&cli.output),
            categories: non_empty_path(&cli.categories_output),
            csv: cli.csv.as_deref().and_then(non_empty_path),
            skip_products: cli.skip_products,
            indent: cli.indent,
        }
    }
}

fn non_empty_path(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

/// Runs the crawl and writes its exports.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or an export file
/// cannot be written. Per-URL crawl failures are reported, not returned.
pub(crate) async fn run_crawl(cli: &Cli, config: &CrawlerConfig) -> anyhow::Result<()> {
    let client = CatalogClient::from_config(config).context("failed to build HTTP client")?;
    let options = CrawlOptions {
        sitemap_index_url: config.sitemap_index_url.clone(),
        limit: cli.limit,
    };

    let mut rng = rand::rng();
    let report = crawl_catalog(&client, &options, &mut rng, |entry| println!("{entry}")).await;

    for line in export_report(&report, &ExportPlan::from_cli(cli))? {
        println!("{line}");
    }
    Ok(())
}

/// Writes every enabled export and returns the user-facing summary lines.
///
/// # Errors
///
/// Returns an error on the first write that fails.
pub(crate) fn export_report(report: &CrawlReport, plan: &ExportPlan) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();

    if plan.skip_products {
        if plan.csv.is_some() {
            tracing::warn!("--csv has no effect together with --skip-products");
            lines.push(SKIP_CSV_NOTICE.to_owned());
        }
    } else {
        // CSV rides along with the product JSON; no JSON path, no CSV.
        if let Some(path) = &plan.products {
            write_json(path, &report.products, plan.indent)?;
            lines.push(format!(
                "Saved {} records to {}",
                report.products.len(),
                path.display()
            ));

            if let Some(csv_path) = &plan.csv {
                write_products_csv(csv_path, &report.products)?;
                lines.push(format!(
                    "Saved {} records to {}",
                    report.products.len(),
                    csv_path.display()
                ));
            }
        }
    }

    if let Some(path) = &plan.categories {
        write_json(path, &report.categories, plan.indent)?;
        lines.push(format!(
            "Saved {} categories to {}",
            report.categories.len(),
            path.display()
        ));
    }

    let summary = report.summary();
    tracing::info!(
        processed = summary.processed(),
        ok = summary.ok,
        skipped = summary.skipped,
        failed = summary.failed,
        "export complete"
    );
    Ok(lines)
}
