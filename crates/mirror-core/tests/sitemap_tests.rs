//! Tests for sitemap tree resolution

use mirror_core::{Error, MirrorConfig, SitemapResolver};
use mirror_test_utils::FakeSite;
use pretty_assertions::assert_eq;
use url::Url;

fn config() -> MirrorConfig {
    MirrorConfig::new(
        "/srv/site/public",
        Url::parse("http://localhost:5504/").unwrap(),
        Url::parse("https://example.com").unwrap(),
    )
}

fn urlset(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{loc}</loc></url>"))
        .collect();
    format!(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</urlset>"#)
}

fn index(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{loc}</loc></sitemap>"))
        .collect();
    format!(r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</sitemapindex>"#)
}

fn resolve(site: &FakeSite) -> mirror_core::Result<Vec<String>> {
    let config = config();
    let root = config.sitemap_url()?;
    let urls = SitemapResolver::new(site, &config).resolve(&root)?;
    Ok(urls.into_iter().map(String::from).collect())
}

#[test]
fn test_flat_urlset() {
    let site = FakeSite::new().route(
        "https://example.com/sitemap.xml",
        200,
        urlset(&["https://example.com/", "https://example.com/about/"]),
    );

    assert_eq!(
        resolve(&site).unwrap(),
        vec!["https://example.com/", "https://example.com/about/"]
    );
}

#[test]
fn test_index_skips_unreachable_sub_sitemap() {
    let site = FakeSite::new()
        .route(
            "https://example.com/sitemap.xml",
            200,
            index(&[
                "https://example.com/pages.xml",
                "https://example.com/broken.xml",
            ]),
        )
        .route(
            "https://example.com/pages.xml",
            200,
            urlset(&["https://example.com/a", "https://example.com/b"]),
        )
        .fail("https://example.com/broken.xml", "connection reset");

    assert_eq!(
        resolve(&site).unwrap(),
        vec!["https://example.com/a", "https://example.com/b"]
    );
}

#[test]
fn test_nested_indexes_dedupe_in_first_seen_order() {
    let site = FakeSite::new()
        .route(
            "https://example.com/sitemap.xml",
            200,
            index(&["https://example.com/one.xml", "https://example.com/nested.xml"]),
        )
        .route(
            "https://example.com/one.xml",
            200,
            urlset(&["https://example.com/b", "https://example.com/a"]),
        )
        .route(
            "https://example.com/nested.xml",
            200,
            index(&["https://example.com/two.xml"]),
        )
        .route(
            "https://example.com/two.xml",
            200,
            urlset(&["https://example.com/a", "https://example.com/c"]),
        );

    assert_eq!(
        resolve(&site).unwrap(),
        vec![
            "https://example.com/b",
            "https://example.com/a",
            "https://example.com/c",
        ]
    );
}

#[test]
fn test_cross_origin_locations_are_dropped() {
    let site = FakeSite::new().route(
        "https://example.com/sitemap.xml",
        200,
        urlset(&[
            "https://example.com/kept",
            "https://cdn.example.com/dropped",
            "http://example.com/wrong-scheme",
            "https://example.com:8443/wrong-port",
        ]),
    );

    assert_eq!(resolve(&site).unwrap(), vec!["https://example.com/kept"]);
}

#[test]
fn test_self_referencing_index_terminates() {
    let site = FakeSite::new()
        .route(
            "https://example.com/sitemap.xml",
            200,
            index(&[
                "https://example.com/sitemap.xml",
                "https://example.com/loop.xml",
            ]),
        )
        .route(
            "https://example.com/loop.xml",
            200,
            index(&["https://example.com/sitemap.xml", "https://example.com/loop.xml"]),
        );

    assert!(resolve(&site).unwrap().is_empty());
    assert_eq!(site.request_count(), 2);
}

#[test]
fn test_depth_bound_stops_expansion() {
    let mut site = FakeSite::new().route(
        "https://example.com/sitemap.xml",
        200,
        index(&["https://example.com/level-1.xml"]),
    );
    for level in 1..=12 {
        let next = format!("https://example.com/level-{}.xml", level + 1);
        site = site.route(
            &format!("https://example.com/level-{level}.xml"),
            200,
            index(&[next.as_str()]),
        );
    }

    let mut config = config();
    config.max_sitemap_depth = 3;
    let root = config.sitemap_url().unwrap();
    let urls = SitemapResolver::new(&site, &config).resolve(&root).unwrap();

    assert!(urls.is_empty());
    // root plus three levels of children
    assert_eq!(site.request_count(), 4);
}

#[test]
fn test_unreachable_root_is_an_error() {
    let site = FakeSite::new();

    let err = resolve(&site).unwrap_err();
    assert!(matches!(err, Error::SitemapUnavailable { .. }));
    assert!(err.to_string().contains("https://example.com/sitemap.xml"));
}
