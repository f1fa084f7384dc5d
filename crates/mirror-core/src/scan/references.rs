//! Tag-attribute reference extraction from page markup.

use std::sync::LazyLock;

use regex::Regex;

use super::ResourceKind;

static LINK_HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*href=["']([^"']+)["']"#).expect("Invalid link regex")
});

static SCRIPT_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script[^>]*src=["']([^"']+)["']"#).expect("Invalid script regex")
});

static IMG_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]*src=["']([^"']+)["']"#).expect("Invalid img regex")
});

static SOURCE_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<source[^>]*src=["']([^"']+)["']"#).expect("Invalid source regex")
});

/// `srcset` and `data-srcset` on any tag.
static SRCSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:srcset|data-srcset)=["']([^"']+)["']"#).expect("Invalid srcset regex")
});

/// References found in one document, grouped by kind in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRefs {
    pub links: Vec<String>,
    pub scripts: Vec<String>,
    pub images: Vec<String>,
    pub sources: Vec<String>,
}

impl ResourceRefs {
    /// All references, links first, then scripts, images and sources.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &str)> + '_ {
        tagged(ResourceKind::Link, &self.links)
            .chain(tagged(ResourceKind::Script, &self.scripts))
            .chain(tagged(ResourceKind::Image, &self.images))
            .chain(tagged(ResourceKind::MediaSource, &self.sources))
    }

    pub fn len(&self) -> usize {
        self.links.len() + self.scripts.len() + self.images.len() + self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn tagged(kind: ResourceKind, refs: &[String]) -> impl Iterator<Item = (ResourceKind, &str)> {
    refs.iter().map(move |r| (kind, r.as_str()))
}

fn captures(regex: &Regex, html: &str) -> Vec<String> {
    regex
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split a candidate list, keeping only each candidate's URL token.
///
/// `"/a.png 1x, /a@2x.png 2x"` yields `["/a.png", "/a@2x.png"]`; width and
/// density descriptors are dropped.
fn srcset_urls(srcset: &str) -> impl Iterator<Item = String> + '_ {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
        .map(str::to_string)
}

/// Extract every resource reference from page markup.
pub fn extract_references(html: &str) -> ResourceRefs {
    let mut sources = captures(&SOURCE_SRC_REGEX, html);
    for caps in SRCSET_REGEX.captures_iter(html) {
        if let Some(srcset) = caps.get(1) {
            sources.extend(srcset_urls(srcset.as_str()));
        }
    }

    ResourceRefs {
        links: captures(&LINK_HREF_REGEX, html),
        scripts: captures(&SCRIPT_SRC_REGEX, html),
        images: captures(&IMG_SRC_REGEX, html),
        sources,
    }
}
