//! Integration tests for `crawl_catalog`.
//!
//! Each test stands up a `wiremock` server that plays the storefront: a
//! sitemap index, one or more child sitemaps and the product pages they list.
//! The throttle is disabled so tests run at full speed.

use std::ops::RangeInclusive;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medcat_core::hash_category_id;
use medcat_scraper::{
    crawl_catalog, CatalogClient, CrawlOptions, CrawlStatus, DayOffsetSource, Throttle,
};

struct Earliest;

impl DayOffsetSource for Earliest {
    fn offset_days(&mut self, range: RangeInclusive<i64>) -> i64 {
        *range.start()
    }
}

fn test_client() -> CatalogClient {
    CatalogClient::new(5, "medcat-test/0.1", "vi,en;q=0.9", Throttle::disabled())
        .expect("failed to build test CatalogClient")
}

fn options(server: &MockServer, limit: Option<usize>) -> CrawlOptions {
    CrawlOptions {
        sitemap_index_url: format!("{}/sitemap.xml", server.uri()),
        limit,
    }
}

fn sitemap_index(children: &[String]) -> String {
    let entries: String = children
        .iter()
        .map(|c| format!("<sitemap><loc>{c}</loc></sitemap>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</sitemapindex>"#
    )
}

fn url_set(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|u| format!("<url><loc>{u}</loc></url>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</urlset>"#
    )
}

fn product_page(page_props: &serde_json::Value) -> String {
    let data = json!({"props": {"pageProps": page_props}});
    format!(
        r#"<!DOCTYPE html><html><head></head><body><div id="__next"></div><script id="__NEXT_DATA__" type="application/json">{data}</script></body></html>"#
    )
}

async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// End-to-end: default price only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn crawl_exports_default_price_product() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(&server, "/sitemap.xml", sitemap_index(&[format!("{base}/sitemap-products.xml")])).await;
    serve(
        &server,
        "/sitemap-products.xml",
        url_set(&[format!("{base}/thuoc/panadol.html")]),
    )
    .await;
    serve(
        &server,
        "/thuoc/panadol.html",
        product_page(&json!({
            "product": {
                "sku": "00021988",
                "webName": "Panadol Extra",
                "categories": [
                    {"slug": "thuoc", "name": "Thuốc", "level": 1},
                    {"slug": "thuoc/giam-dau", "name": "Giảm đau", "level": 2}
                ]
            },
            "transformedProductData": {"defaultPrice": {"price": 10000}}
        })),
    )
    .await;

    let mut statuses = Vec::new();
    let report = crawl_catalog(&test_client(), &options(&server, None), &mut Earliest, |e| {
        statuses.push(e.to_string());
    })
    .await;

    assert_eq!(report.products.len(), 1);
    let product = &report.products[0];
    assert_eq!(product.id, "00021988");
    assert_eq!(product.price, 10_000);
    assert_eq!(product.discount, 0);
    assert_eq!(product.stock, 0);
    assert_eq!(product.category_id, hash_category_id("thuoc/giam-dau"));

    let slugs: Vec<_> = report.categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["thuoc", "thuoc/giam-dau"]);
    assert_eq!(
        report.categories[1].parent_id,
        Some(hash_category_id("thuoc"))
    );

    assert_eq!(statuses, vec![format!("[OK ] {base}/thuoc/panadol.html")]);
}

// ---------------------------------------------------------------------------
// SKIP: page without payload, crawl continues
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_without_payload_is_skipped_and_crawl_continues() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(&server, "/sitemap.xml", sitemap_index(&[format!("{base}/s1.xml")])).await;
    serve(
        &server,
        "/s1.xml",
        url_set(&[
            format!("{base}/thuoc/no-data.html"),
            format!("{base}/thuoc/no-product.html"),
            format!("{base}/thuoc/ok.html"),
        ]),
    )
    .await;
    serve(&server, "/thuoc/no-data.html", "<html><body>plain</body></html>".to_owned()).await;
    serve(&server, "/thuoc/no-product.html", product_page(&json!({"seo": {}}))).await;
    serve(
        &server,
        "/thuoc/ok.html",
        product_page(&json!({"product": {"sku": "OK1"}})),
    )
    .await;

    let report = crawl_catalog(&test_client(), &options(&server, None), &mut Earliest, |_| {}).await;

    let statuses: Vec<_> = report.entries.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![CrawlStatus::Skip, CrawlStatus::Skip, CrawlStatus::Ok]
    );
    assert_eq!(
        report.entries[0].to_string(),
        format!("[SKIP] {base}/thuoc/no-data.html (no page payload)")
    );
    assert_eq!(
        report.entries[1].to_string(),
        format!("[SKIP] {base}/thuoc/no-product.html (no product data)")
    );
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].id, "OK1");
}

// ---------------------------------------------------------------------------
// ERR: transport failure on one page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_page_is_recorded_as_err() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(&server, "/sitemap.xml", sitemap_index(&[format!("{base}/s1.xml")])).await;
    serve(
        &server,
        "/s1.xml",
        url_set(&[format!("{base}/thuoc/gone.html"), format!("{base}/thuoc/ok.html")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/thuoc/gone.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    serve(
        &server,
        "/thuoc/ok.html",
        product_page(&json!({"product": {"sku": "OK1"}})),
    )
    .await;

    let report = crawl_catalog(&test_client(), &options(&server, None), &mut Earliest, |_| {}).await;

    assert_eq!(report.entries[0].status, CrawlStatus::Err);
    assert!(
        report.entries[0].to_string().starts_with(&format!("[ERR] {base}/thuoc/gone.html -> ")),
        "got: {}",
        report.entries[0]
    );
    assert_eq!(report.entries[1].status, CrawlStatus::Ok);
    let summary = report.summary();
    assert_eq!((summary.ok, summary.skipped, summary.failed), (1, 0, 1));
}

// ---------------------------------------------------------------------------
// Broken child sitemap does not abort siblings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broken_child_sitemap_does_not_abort_siblings() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(
        &server,
        "/sitemap.xml",
        sitemap_index(&[
            format!("{base}/broken.xml"),
            format!("{base}/missing.xml"),
            format!("{base}/good.xml"),
        ]),
    )
    .await;
    serve(&server, "/broken.xml", "<urlset><url><loc>".to_owned()).await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    serve(
        &server,
        "/good.xml",
        url_set(&[
            format!("{base}/bai-viet/huong-dan.html"),
            format!("{base}/thuoc/ok.html"),
        ]),
    )
    .await;
    serve(
        &server,
        "/thuoc/ok.html",
        product_page(&json!({"product": {"sku": "OK1"}})),
    )
    .await;

    let report = crawl_catalog(&test_client(), &options(&server, None), &mut Earliest, |_| {}).await;

    let urls: Vec<_> = report.entries.iter().map(|e| e.url.clone()).collect();
    assert_eq!(urls, vec![format!("{base}/thuoc/ok.html")]);
    assert_eq!(report.products.len(), 1);
}

// ---------------------------------------------------------------------------
// --limit caps processed URLs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn limit_caps_processed_urls() {
    let server = MockServer::start().await;
    let base = server.uri();

    let pages: Vec<String> = (1..=3).map(|i| format!("{base}/thuoc/p{i}.html")).collect();
    serve(&server, "/sitemap.xml", sitemap_index(&[format!("{base}/s1.xml")])).await;
    serve(&server, "/s1.xml", url_set(&pages)).await;
    for i in 1..=3 {
        serve(
            &server,
            &format!("/thuoc/p{i}.html"),
            product_page(&json!({"product": {"sku": format!("P{i}")}})),
        )
        .await;
    }

    let report =
        crawl_catalog(&test_client(), &options(&server, Some(2)), &mut Earliest, |_| {}).await;

    let ids: Vec<_> = report.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P2"]);
    assert_eq!(report.entries.len(), 2);
}

#[tokio::test]
async fn unreachable_index_yields_empty_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = crawl_catalog(&test_client(), &options(&server, None), &mut Earliest, |_| {}).await;

    assert!(report.products.is_empty());
    assert!(report.categories.is_empty());
    assert!(report.entries.is_empty());
}

// ---------------------------------------------------------------------------
// Categories merge across products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn categories_merge_across_products() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(&server, "/sitemap.xml", sitemap_index(&[format!("{base}/s1.xml")])).await;
    serve(
        &server,
        "/s1.xml",
        url_set(&[format!("{base}/thuoc/a.html"), format!("{base}/thuoc/b.html")]),
    )
    .await;
    serve(
        &server,
        "/thuoc/a.html",
        product_page(&json!({"product": {"sku": "A", "categories": [
            {"slug": "khang-sinh", "name": ""}
        ]}})),
    )
    .await;
    serve(
        &server,
        "/thuoc/b.html",
        product_page(&json!({"product": {"sku": "B", "categories": [
            {"slug": "thuoc", "name": "Thuốc", "level": "1"},
            {"slug": "khang-sinh", "name": "Kháng sinh", "level": "2"}
        ]}})),
    )
    .await;

    let report = crawl_catalog(&test_client(), &options(&server, None), &mut Earliest, |_| {}).await;

    assert_eq!(report.categories.len(), 2);
    let khang_sinh = report
        .categories
        .iter()
        .find(|c| c.slug == "khang-sinh")
        .expect("khang-sinh registered");
    assert_eq!(khang_sinh.name, "Kháng sinh");
    assert_eq!(khang_sinh.parent_id, Some(hash_category_id("thuoc")));
}

// ---------------------------------------------------------------------------
// Sparse product section
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_product_section_is_exported_with_url_id() {
    let server = MockServer::start().await;
    let base = server.uri();
    let page_url = format!("{base}/thuoc/sparse.html");
    serve(&server, "/sitemap.xml", sitemap_index(&[format!("{base}/sitemap-products.xml")])).await;
    serve(&server, "/sitemap-products.xml", url_set(&[page_url.clone()])).await;
    serve(&server, "/thuoc/sparse.html", product_page(&json!({"product": {}}))).await;

    let report = crawl_catalog(&test_client(), &options(&server, None), &mut Earliest, |_| {}).await;

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].status, CrawlStatus::Ok);
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].id, medcat_core::hash_url_id(&page_url));
    assert!(report.categories.is_empty());
}
