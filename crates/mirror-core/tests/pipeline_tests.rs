//! End-to-end tests for validate, snapshot, sync and compare
//!
//! The fake site plays both roles: it serves the mirror directory as the page
//! server does and answers origin requests from its route table.

use mirror_core::sync::{requests_from_chunk_scan, requests_from_report};
use mirror_core::{
    MirrorConfig, Reconciler, ReportBuilder, ReportDiff, ReportStore, ResourceKind,
};
use mirror_test_utils::{FakeSite, TestMirror};
use pretty_assertions::assert_eq;
use url::Url;

const PAGE_SERVER: &str = "http://localhost:5504/";
const ORIGIN: &str = "https://example.com/";

fn config(mirror: &TestMirror) -> MirrorConfig {
    MirrorConfig::new(
        mirror.root(),
        Url::parse(PAGE_SERVER).unwrap(),
        Url::parse(ORIGIN).unwrap(),
    )
    .with_report_dir(mirror.reports())
}

fn site(mirror: &TestMirror) -> FakeSite {
    FakeSite::new()
        .serve_dir(PAGE_SERVER, mirror.root())
        .route("https://example.com/_next/static/chunks/main.js", 200, "main()")
        .route("https://example.com/styles/site.css", 200, "body{}")
}

const HOME: &str = r#"<html><head>
<link rel="stylesheet" href="/styles/site.css">
<script src="/_next/static/chunks/main.js"></script>
<script src="https://www.googletagmanager.com/gtag/js"></script>
</head><body><img src="/img/logo.png"></body></html>"#;

#[test]
fn test_sync_from_report_resolves_missing_resources() {
    let mirror = TestMirror::new()
        .page("/", HOME)
        .file("img/logo.png", b"png");
    let config = config(&mirror);
    let site = site(&mirror);
    let store = ReportStore::new(&config.report_dir);

    let before = ReportBuilder::new(&config, &site).build().unwrap();
    assert_eq!(before.pages.len(), 1);
    assert_eq!(before.pages[0].checked_resources, 3);
    assert_eq!(before.pages[0].external_ignored, 1);
    assert_eq!(before.missing_resources().len(), 2);
    store.save(&before).unwrap();
    store.snapshot_before_sync().unwrap();

    let targets = requests_from_report(&store.load_latest().unwrap(), &config);
    let outcome = Reconciler::new(&config, &site).sync(targets);
    assert_eq!(outcome.summary(), "downloaded=2, exists=0, failed=0");
    assert_eq!(mirror.read("_next/static/chunks/main.js"), "main()");

    let after = ReportBuilder::new(&config, &site).build().unwrap();
    store.save(&after).unwrap();

    let diff = ReportDiff::between(&store.load_before_sync().unwrap(), &after);
    assert_eq!(diff.resolved().len(), 2);
    assert!(diff.still_missing().is_empty());
    assert!(diff.new_missing().is_empty());
    store.save_comparison(&diff.render_markdown()).unwrap();
    assert!(store.dir().join("validation_compare.md").is_file());
}

#[test]
fn test_sync_writes_escaped_references_to_decoded_paths() {
    let mirror = TestMirror::new().page(
        "/",
        r#"<img src="/img/my photo.png"><img src="/img/café.png">"#,
    );
    let config = config(&mirror);
    let site = FakeSite::new()
        .serve_dir(PAGE_SERVER, mirror.root())
        .route("https://example.com/img/my photo.png", 200, "space")
        .route("https://example.com/img/café.png", 200, "accent");

    let before = ReportBuilder::new(&config, &site).build().unwrap();
    assert_eq!(
        before.missing_resources().into_iter().collect::<Vec<_>>(),
        vec![
            "http://localhost:5504/img/caf%C3%A9.png".to_string(),
            "http://localhost:5504/img/my%20photo.png".to_string(),
        ]
    );

    let outcome = Reconciler::new(&config, &site).sync(requests_from_report(&before, &config));
    assert_eq!(outcome.summary(), "downloaded=2, exists=0, failed=0");
    assert_eq!(mirror.read("img/my photo.png"), "space");
    assert_eq!(mirror.read("img/café.png"), "accent");
    mirror.assert_file_absent("img/my%20photo.png");

    let after = ReportBuilder::new(&config, &site).build().unwrap();
    assert_eq!(after.total_missing(), 0);
    assert_eq!(ReportDiff::between(&before, &after).resolved().len(), 2);
}

#[test]
fn test_resolved_and_new_missing_are_disjoint() {
    let mirror = TestMirror::new().page("/", HOME);
    let config = config(&mirror);
    let site = site(&mirror);

    let before = ReportBuilder::new(&config, &site).build().unwrap();
    let mirror = mirror
        .file("img/logo.png", b"png")
        .page("/", r#"<img src="/img/logo.png"><img src="/img/new.png">"#);
    let after = ReportBuilder::new(&config, &site).build().unwrap();

    let diff = ReportDiff::between(&before, &after);
    assert!(diff.resolved().is_disjoint(diff.new_missing()));
    assert_eq!(diff.still_missing(), &after.missing_resources());
    assert!(diff.new_missing().contains("http://localhost:5504/img/new.png"));
    mirror.assert_file_exists("img/logo.png");
}

#[test]
fn test_chunk_scan_sync_is_idempotent() {
    let mirror = TestMirror::new().page("/", HOME);
    let config = config(&mirror);
    let site = site(&mirror);

    let first = Reconciler::new(&config, &site).sync(requests_from_chunk_scan(&config.site_root));
    assert_eq!(first.downloaded, 1);

    site.clear_requests();
    let second = Reconciler::new(&config, &site).sync(requests_from_chunk_scan(&config.site_root));
    assert_eq!(second.summary(), "downloaded=0, exists=1, failed=0");
    assert_eq!(site.request_count(), 0);
}

#[test]
fn test_unreachable_page_server_is_recorded_per_page() {
    let mirror = TestMirror::new().page("/", HOME).page("/about/", HOME);
    let config = config(&mirror);
    let site = FakeSite::new()
        .fail(PAGE_SERVER, "connection refused")
        .fail("http://localhost:5504/about/", "connection refused");

    let report = ReportBuilder::new(&config, &site).build().unwrap();

    assert_eq!(report.failed_pages(), 2);
    assert!(report.pages.iter().all(|p| p.status.is_none()));
    assert!(report.missing_resources().is_empty());
}

#[test]
fn test_report_json_shape() {
    let mirror = TestMirror::new().page("/", r#"<source srcset="/a.webp 1x, /b.webp 2x">"#);
    let config = config(&mirror);
    let site = FakeSite::new().serve_dir(PAGE_SERVER, mirror.root());

    let report = ReportBuilder::new(&config, &site).build().unwrap();
    let value = serde_json::to_value(&report).unwrap();

    let page = &value["pages"][0];
    assert_eq!(page["path"], "/");
    assert_eq!(page["ok"], true);
    assert_eq!(page["status"], 200);
    assert_eq!(page["checked_resources"], 2);
    assert_eq!(page["missing_resources"][0]["type"], "source");
    assert_eq!(
        page["missing_resources"][1]["url"],
        "http://localhost:5504/b.webp"
    );
    assert_eq!(report.pages[0].missing_resources[0].kind, ResourceKind::MediaSource);
}
