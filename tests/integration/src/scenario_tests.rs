//! Scenario tests for the behaviours the tools guarantee across components

use std::collections::BTreeSet;

use mirror_core::sync::{SyncRequest, requests_from_paths};
use mirror_core::{MirrorConfig, Reconciler, ReportBuilder, ReportDiff, ReportStore, SyncStatus};
use mirror_fs::SitePath;
use mirror_test_utils::{FakeSite, TestMirror};
use pretty_assertions::assert_eq;
use url::Url;

fn config(mirror: &TestMirror) -> MirrorConfig {
    MirrorConfig::new(
        mirror.root(),
        Url::parse("http://localhost:5504/").unwrap(),
        Url::parse("https://example.com").unwrap(),
    )
    .with_report_dir(mirror.reports())
}

#[test]
fn test_clean_route_and_trailing_slash_share_a_file() {
    let mirror = TestMirror::new();
    let config = config(&mirror);
    let site = FakeSite::new()
        .route("https://example.com/about", 200, "clean")
        .route("https://example.com/about/", 200, "slash");

    let outcome = Reconciler::new(&config, &site).sync([
        SyncRequest::path("/about"),
        SyncRequest::path("/about/"),
    ]);

    assert_eq!(outcome.summary(), "downloaded=1, exists=1, failed=0");
    assert_eq!(
        SitePath::parse("/about").unwrap().local_path(&config.site_root),
        SitePath::parse("/about/").unwrap().local_path(&config.site_root)
    );
    assert_eq!(mirror.read("about/index.html"), "clean");
}

#[test]
fn test_ignored_and_local_image_counts() {
    let html = r#"<img src="/img/a.png"><img src="https://googletagmanager.com/x.js">"#;
    let mirror = TestMirror::new().page("/", html).file("img/a.png", b"png");
    let config = config(&mirror);
    let site = FakeSite::new().serve_dir("http://localhost:5504/", mirror.root());

    let report = ReportBuilder::new(&config, &site).build().unwrap();

    assert_eq!(report.pages[0].checked_resources, 1);
    assert_eq!(report.pages[0].external_ignored, 1);
}

#[test]
fn test_diff_example_sets() {
    let set = |urls: &[&str]| -> BTreeSet<String> { urls.iter().map(|u| u.to_string()).collect() };
    let diff = ReportDiff::from_sets(set(&["/a.js", "/b.css"]), set(&["/b.css", "/c.js"]));

    assert_eq!(diff.resolved(), &set(&["/a.js"]));
    assert_eq!(diff.still_missing(), &set(&["/b.css", "/c.js"]));
    assert_eq!(diff.new_missing(), &set(&["/c.js"]));
}

#[test]
fn test_counts_always_sum_to_target_count() {
    let mirror = TestMirror::new().file("present.css", b"");
    let config = config(&mirror);
    let site = FakeSite::new()
        .route("https://example.com/ok.js", 200, "ok")
        .fail("https://example.com/timeout.js", "operation timed out");

    let targets = requests_from_paths(&[
        "/present.css",
        "/ok.js",
        "/timeout.js",
        "/absent.js",
        "relative.js",
        "/ok.js",
    ]);
    let outcome = Reconciler::new(&config, &site).sync(targets.clone());

    assert_eq!(outcome.downloaded + outcome.exists + outcome.failed, targets.len());
    assert_eq!(targets.len(), 5);
    assert_eq!(outcome.with_status(SyncStatus::Failed).count(), 3);
}

#[test]
fn test_report_written_by_store_round_trips_through_disk() {
    let mirror = TestMirror::new().page("/", r#"<script src="/gone.js"></script>"#);
    let config = config(&mirror);
    let site = FakeSite::new().serve_dir("http://localhost:5504/", mirror.root());
    let store = ReportStore::new(&config.report_dir);

    let report = ReportBuilder::new(&config, &site).build().unwrap();
    store.save(&report).unwrap();

    let raw = std::fs::read_to_string(mirror.reports().join("validation_report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value["pages"][0]["missing_resources"][0]["url"],
        "http://localhost:5504/gone.js"
    );
    assert_eq!(store.load_latest().unwrap(), report);

    let markdown = std::fs::read_to_string(mirror.reports().join("validation_report.md")).unwrap();
    assert!(markdown.contains("  - missing script: http://localhost:5504/gone.js (status=404, err=-)"));
}
