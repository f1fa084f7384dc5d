//! Reference classification policy

/// Where a reference points, deciding whether it is checked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    /// Root-relative or relative; checked against the page server
    Local,
    /// Matches a configured third-party host; counted, never checked
    ExternalIgnored,
    /// Any other absolute reference; dropped
    External,
}

/// Classify a raw reference.
///
/// Host matching is plain substring containment, so entries may carry a
/// path (`google.com/ccm`). The ignored-host test runs first.
pub fn classify(url: &str, ignored_hosts: &[String]) -> Locality {
    if url.is_empty() {
        return Locality::External;
    }
    if ignored_hosts.iter().any(|host| url.contains(host.as_str())) {
        return Locality::ExternalIgnored;
    }
    if url.starts_with('/') || url.starts_with("./") || url.starts_with("../") {
        return Locality::Local;
    }
    Locality::External
}
