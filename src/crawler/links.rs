//! Hyperlink normalization for domain-scoped crawling.
//!
//! Raw `href` values come in several shapes: absolute URLs, root-relative
//! paths, page-relative paths, fragments, and mailto links. Each is either
//! normalized to an absolute in-domain URL or discarded. The rules are
//! applied in order and the first match wins:
//!
//! 1. Absolute `http(s)` links are kept verbatim when their host equals the
//!    crawl domain, otherwise dropped.
//! 2. Links starting with `/` (including protocol-relative `//host/...`)
//!    are re-rooted at the crawl domain with the base URL's scheme.
//! 3. Fragment-only and `mailto:` links are dropped.
//! 4. Anything else resolves against the page it appeared on.
//!
//! A single trailing slash is removed from the result so `.../docs` and
//! `.../docs/` dedupe to the same queue entry.

use url::Url;

/// Normalize one raw `href` found on `base`, scoped to `domain`.
///
/// Returns `None` when the link points off-domain or is not a page link.
pub fn sanitize_link(base: &Url, domain: &str, link: &str) -> Option<String> {
    let mut clean = if link.starts_with("http://") || link.starts_with("https://") {
        let parsed = Url::parse(link).ok()?;
        if parsed.host_str() == Some(domain) {
            link.to_string()
        } else {
            return None;
        }
    } else if link.starts_with('/') {
        format!("{}://{}{}", base.scheme(), domain, link)
    } else if link.starts_with('#') || link.starts_with("mailto:") {
        return None;
    } else {
        base.join(link).ok()?.to_string()
    };

    if clean.ends_with('/') {
        clean.pop();
    }
    Some(clean)
}
