//! Field extractors that need no browser

use regex::Regex;
use std::sync::LazyLock;

static NEWS_ID_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"news_id=(\d+)").expect("BUG: hardcoded news_id regex is invalid")
});

static TRAILING_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(\d+)$").expect("BUG: hardcoded trailing-id regex is invalid")
});

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("BUG: hardcoded date regex is invalid")
});

/// Navigation and menu words stripped from the page-body fallback.
/// Removal is literal, so words containing them are cut too.
static MENU_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Login|Register|Member|Home|News|Sports|Entertainment|Finance|Health)")
        .expect("BUG: hardcoded menu keyword regex is invalid")
});

/// News ID from a numeric `news_id=` parameter, else a trailing `/<digits>`
#[must_use]
pub fn news_id_from_url(url: &str) -> Option<String> {
    NEWS_ID_PARAM
        .captures(url)
        .or_else(|| TRAILING_DIGITS.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First yyyy-mm-dd embedded in a byline
#[must_use]
pub fn date_from_byline(byline: &str) -> Option<String> {
    ISO_DATE
        .captures(byline)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Body text with navigation keywords removed
#[must_use]
pub fn strip_menu_keywords(body_text: &str) -> String {
    MENU_KEYWORDS.replace_all(body_text, "").into_owned()
}
