//! Core configuration types for a scrape session
//!
//! `SessionConfig` holds everything that stays fixed for the lifetime of a
//! browser session. `SearchQuery` carries the per-invocation search input and
//! `ScrapeOptions` the output/interaction choices of one run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{
    ARTICLE_SETTLE_SECS, DEFAULT_POLL_INTERVAL_MILLIS, DEFAULT_WAIT_TIMEOUT_SECS,
    LOGIN_SETTLE_SECS, PAGE_SETTLE_SECS, PORTAL_URL, RESULTS_SETTLE_SECS,
};

/// Browser session configuration, immutable once the session starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Explicit Chrome/Chromium executable.
    /// When unset the executable is discovered or downloaded.
    pub(crate) browser_executable: Option<PathBuf>,

    /// Persistent profile directory, used to reuse a previously
    /// authenticated session. Never deleted on close.
    pub(crate) user_data_dir: Option<PathBuf>,

    pub(crate) headless: bool,

    /// Search portal landing page
    pub(crate) portal_url: String,

    /// Bounded-wait timeout for element lookups
    ///
    /// Default: 10 seconds
    pub(crate) wait_timeout_secs: u64,

    /// Poll interval of bounded waits
    ///
    /// Default: 500 milliseconds
    pub(crate) poll_interval_millis: u64,

    /// Settle delay after opening an article. Default: 2 seconds
    pub(crate) article_settle_secs: u64,

    /// Settle delay after the login trigger. Default: 3 seconds
    pub(crate) login_settle_secs: u64,

    /// Settle delay after moving to a later result page. Default: 3 seconds
    pub(crate) page_settle_secs: u64,

    /// Settle delay after submitting the search. Default: 5 seconds
    pub(crate) results_settle_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser_executable: None,
            user_data_dir: None,
            headless: false,
            portal_url: PORTAL_URL.to_string(),
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            poll_interval_millis: DEFAULT_POLL_INTERVAL_MILLIS,
            article_settle_secs: ARTICLE_SETTLE_SECS,
            login_settle_secs: LOGIN_SETTLE_SECS,
            page_settle_secs: PAGE_SETTLE_SECS,
            results_settle_secs: RESULTS_SETTLE_SECS,
        }
    }
}

/// Keyword/date search submitted once per scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub(crate) keyword: String,
    /// yyyy-mm-dd, passed verbatim to the portal
    pub(crate) start_date: String,
    /// yyyy-mm-dd, passed verbatim to the portal
    pub(crate) end_date: String,
    pub(crate) max_pages: Option<usize>,
    pub(crate) max_articles: usize,
}

/// Output and interaction choices for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// CSV destination; nothing is written when unset
    pub output: Option<PathBuf>,
    /// Pause after the login trigger until a human confirms
    pub manual_login: bool,
}

impl ScrapeOptions {
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_manual_login(mut self, manual: bool) -> Self {
        self.manual_login = manual;
        self
    }
}
