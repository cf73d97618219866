//! Data structures and selectors for the portal search workflow

use serde::{Deserialize, Serialize};

// =============================================================================
// Selectors
// =============================================================================

/// "定址登入" (institutional IP login) trigger on the landing page
pub const LOGIN_TRIGGER_XPATH: &str = "//a[contains(text(), '定址登入')]";

/// Keyword input
pub const KEYWORD_INPUT_ID: &str = "SearchString";

/// Date range inputs (yyyy-mm-dd)
pub const START_DATE_INPUT_ID: &str = "datepicker-start";
pub const END_DATE_INPUT_ID: &str = "datepicker-end";

/// Search form submit button
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[name='submit']";

/// Result summary box rendered above the listing
pub const RESULT_MESSAGE_SELECTOR: &str = "div[class='message']";

/// Title anchors of the result listing
pub const RESULT_TITLE_SELECTOR: &str = "h2[class='control-pic'] > a";

/// "共搜尋到 N 筆資料" marker, matched against the page source
pub const TOTAL_RESULTS_PATTERN: &str = r#"共搜尋到\s*<span class="mark">(\d+)</span>筆資料"#;

// =============================================================================
// Data Structures
// =============================================================================

/// A (title, absolute URL) pair harvested from a result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Listing title of the article
    pub title: String,

    /// Absolute article URL
    pub link: String,
}

impl LinkEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// What the search workflow learned from the first result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    pub total_results: usize,
    /// Pages to harvest, after applying the caller's page cap
    pub total_pages: usize,
}
