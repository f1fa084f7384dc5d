//! Bundle chunk path extraction.
//!
//! Matches fixed `/_next/static/` prefixes plus a known extension anywhere in
//! the text, so chunk references inside already-mirrored scripts and
//! stylesheets are found as well as those in page markup.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static CHUNK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Script and style chunks, including nested and dynamic route chunks
        r"/_next/static/chunks/(?:[A-Za-z0-9._%()\[\]-]+/)*[A-Za-z0-9._%\[\]-]+\.(?:js|css)",
        // Extracted stylesheets
        r"/_next/static/css/[A-Za-z0-9._-]+\.css",
        // Fonts and images emitted by the bundler
        r"/_next/static/media/[A-Za-z0-9._-]+\.(?:woff2|woff|ttf|svg|png|jpg)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid chunk regex"))
    .collect()
});

/// Extract distinct bundle paths from any text, sorted.
pub fn extract_chunk_paths(text: &str) -> BTreeSet<String> {
    CHUNK_PATTERNS
        .iter()
        .flat_map(|regex| regex.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_chunks_inside_script_text() {
        let js = r#"self.__next_f.push([1,"/_next/static/chunks/webpack-9a1f.js"]);
            import("/_next/static/chunks/app/blog/page-77c2.js");
            var css="/_next/static/css/4e1b2c.css";"#;

        let found: Vec<String> = extract_chunk_paths(js).into_iter().collect();
        assert_eq!(
            found,
            vec![
                "/_next/static/chunks/app/blog/page-77c2.js",
                "/_next/static/chunks/webpack-9a1f.js",
                "/_next/static/css/4e1b2c.css",
            ]
        );
    }

    #[test]
    fn finds_dynamic_route_chunks() {
        let js = r#"["/_next/static/chunks/app/blog/%5Bslug%5D/page-3c1d.js",
            "/_next/static/chunks/app/docs/[...path]/page-8e0a.js",
            "/_next/static/chunks/app/(marketing)/pricing/page-11.js"]"#;

        let found: Vec<String> = extract_chunk_paths(js).into_iter().collect();
        assert_eq!(
            found,
            vec![
                "/_next/static/chunks/app/(marketing)/pricing/page-11.js",
                "/_next/static/chunks/app/blog/%5Bslug%5D/page-3c1d.js",
                "/_next/static/chunks/app/docs/[...path]/page-8e0a.js",
            ]
        );
    }

    #[test]
    fn finds_static_media() {
        let css = "@font-face{src:url(/_next/static/media/inter.var.woff2) format('woff2')}";
        let found = extract_chunk_paths(css);
        assert!(found.contains("/_next/static/media/inter.var.woff2"));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn duplicates_collapse() {
        let html = r#"<script src="/_next/static/chunks/main.js"></script>
            <link rel="preload" href="/_next/static/chunks/main.js">"#;
        assert_eq!(extract_chunk_paths(html).len(), 1);
    }

    #[test]
    fn unrelated_paths_are_ignored() {
        let html = r#"<img src="/img/logo.png"><script src="/static/app.js"></script>"#;
        assert!(extract_chunk_paths(html).is_empty());
    }
}
