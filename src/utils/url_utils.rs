//! URL manipulation utilities.
//!
//! Helpers for turning listing hrefs into absolute links and for
//! addressing result pages by their `page=` query parameter.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static PAGE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"page=\d+").expect("BUG: hardcoded page parameter regex is invalid")
});

/// Resolve an href found on `base` into an absolute URL.
///
/// Already-absolute hrefs are returned unchanged. Returns `None` when the
/// base itself is not a valid URL and the href is relative.
#[must_use]
pub fn resolve_link(base: &str, href: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.to_string());
    }
    Url::parse(base)
        .and_then(|base| base.join(href))
        .map(|joined| joined.to_string())
        .ok()
}

/// Build the URL of result page `page` from the current listing URL.
///
/// When the URL already mentions `page=`, every `page=<digits>` occurrence is
/// rewritten; otherwise the parameter is appended with `&` or `?` as needed.
#[must_use]
pub fn page_url(current: &str, page: usize) -> String {
    if current.contains("page=") {
        PAGE_PARAM
            .replace_all(current, format!("page={page}").as_str())
            .into_owned()
    } else if current.contains('?') {
        format!("{current}&page={page}")
    } else {
        format!("{current}?page={page}")
    }
}
