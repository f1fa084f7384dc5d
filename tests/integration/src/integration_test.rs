//! End-to-end integration test for a full mirror repair cycle
//!
//! Exercises the complete flow: config loading -> validate -> snapshot ->
//! sync (report, chunks, sitemap pages) -> validate -> compare.

use std::fs;

use mirror_core::sync::{
    missing_pages, requests_from_chunk_scan, requests_from_report, write_missing_pages_list,
};
use mirror_core::{
    CONFIG_FILE, MirrorConfig, Reconciler, ReportBuilder, ReportDiff, ReportStore,
    SitemapResolver,
};
use mirror_test_utils::{FakeSite, TestMirror};
use pretty_assertions::assert_eq;

const HOME: &str = r#"<!doctype html><html><head>
<link rel="stylesheet" href="/_next/static/css/app.css">
<script src="/_next/static/chunks/webpack-1a2b.js"></script>
<script src="https://www.googletagmanager.com/gtag/js?id=G-1"></script>
</head><body>
<img src="/img/hero.webp" srcset="/img/hero.webp 1x, /img/hero@2x.webp 2x">
<a href="/pricing">Pricing</a>
</body></html>"#;

const WEBPACK: &str = r#"self.__chunks=["/_next/static/chunks/app/page-77c2.js"];"#;

/// Set up a workspace with a mirror.toml next to the mirror root
fn setup_mirror() -> TestMirror {
    let mirror = TestMirror::new()
        .page("/", HOME)
        .file("img/hero.webp", b"webp");
    fs::write(
        mirror.workspace().join(CONFIG_FILE),
        r#"
origin = "https://example.com"
base_url = "http://localhost:5504"

[timeouts]
probe_secs = 1
"#,
    )
    .unwrap();
    mirror
}

fn origin(site: FakeSite) -> FakeSite {
    site.route(
        "https://example.com/sitemap.xml",
        200,
        r#"<?xml version="1.0"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/pages.xml</loc></sitemap>
</sitemapindex>"#,
    )
    .route(
        "https://example.com/pages.xml",
        200,
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url><loc>https://example.com/pricing</loc></url>
</urlset>"#,
    )
    .route("https://example.com/pricing", 200, "<html>pricing</html>")
    .route("https://example.com/_next/static/css/app.css", 200, "body{}")
    .route("https://example.com/_next/static/chunks/webpack-1a2b.js", 200, WEBPACK)
    .route("https://example.com/_next/static/chunks/app/page-77c2.js", 200, "page()")
    .route("https://example.com/img/hero@2x.webp", 200, "webp2x")
}

#[test]
fn test_full_repair_cycle() {
    let mirror = setup_mirror();
    let config = MirrorConfig::load(&mirror.workspace().join(CONFIG_FILE)).unwrap();
    assert_eq!(config.site_root, mirror.root());
    assert_eq!(config.report_dir, mirror.reports());

    let site = origin(FakeSite::new().serve_dir("http://localhost:5504/", mirror.root()));
    let store = ReportStore::new(&config.report_dir);

    // 1. Validate the incomplete mirror
    let before = ReportBuilder::new(&config, &site).build().unwrap();
    let home = &before.pages[0];
    assert!(home.ok);
    assert_eq!(home.external_ignored, 1);
    assert_eq!(home.checked_resources, 5);
    assert_eq!(before.missing_resources().len(), 3);
    store.save(&before).unwrap();
    store.snapshot_before_sync().unwrap();

    // 2. Fill the gaps the report found
    let from_report = Reconciler::new(&config, &site)
        .sync(requests_from_report(&store.load_latest().unwrap(), &config));
    assert_eq!(from_report.summary(), "downloaded=3, exists=0, failed=0");

    // 3. The downloaded webpack runtime references a chunk no page names
    let from_chunks =
        Reconciler::new(&config, &site).sync(requests_from_chunk_scan(&config.site_root));
    assert_eq!(from_chunks.summary(), "downloaded=1, exists=2, failed=0");
    mirror.assert_file_exists("_next/static/chunks/app/page-77c2.js");

    // 4. Pages listed by the sitemap but absent locally
    let urls = SitemapResolver::new(&site, &config)
        .resolve(&config.sitemap_url().unwrap())
        .unwrap();
    assert_eq!(urls.len(), 2);
    let missing = missing_pages(&urls, &config);
    write_missing_pages_list(&config.site_root, &missing).unwrap();
    let from_sitemap =
        Reconciler::new(&config, &site).sync(missing.iter().map(|page| page.request()));
    assert_eq!(from_sitemap.downloaded, 1);
    assert_eq!(mirror.read("pricing/index.html"), "<html>pricing</html>");

    // 5. Validate again and compare
    let after = ReportBuilder::new(&config, &site).build().unwrap();
    store.save(&after).unwrap();
    assert_eq!(after.pages.len(), 2);
    assert!(after.pages.iter().all(|p| p.ok));

    let diff = ReportDiff::between(&store.load_before_sync().unwrap(), &store.load_latest().unwrap());
    assert_eq!(diff.resolved().len(), 3);
    assert!(diff.still_missing().is_empty());
    assert!(diff.new_missing().is_empty());

    let compare = store.save_comparison(&diff.render_markdown()).unwrap();
    let summary = fs::read_to_string(compare).unwrap();
    assert!(summary.starts_with("Validation Compare Summary"));
    assert!(summary.contains("Resolved count: 3"));
}

#[test]
fn test_repeated_sync_is_a_no_op() {
    let mirror = setup_mirror();
    let config = MirrorConfig::load(&mirror.workspace().join(CONFIG_FILE)).unwrap();
    let site = origin(FakeSite::new().serve_dir("http://localhost:5504/", mirror.root()));

    let report = ReportBuilder::new(&config, &site).build().unwrap();
    let targets = requests_from_report(&report, &config);
    Reconciler::new(&config, &site).sync(targets.clone());

    site.clear_requests();
    let again = Reconciler::new(&config, &site).sync(targets);
    assert_eq!(again.downloaded, 0);
    assert_eq!(again.exists, again.total());
    assert_eq!(site.request_count(), 0);
}
