//! Shared configuration constants for udn_newsscrape
//!
//! This module contains default values and fixed portal facts used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Landing page of the UDN news archive search portal
pub const PORTAL_URL: &str = "https://udndata.com/ndapp/Index?cp=udn";

/// Number of listing entries the portal renders per result page
pub const RESULTS_PER_PAGE: usize = 20;

/// Default cap on the number of articles visited per scrape
pub const DEFAULT_MAX_ARTICLES: usize = 50;

/// Default bounded-wait timeout for element lookups: 10 seconds
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 10;

/// Default poll interval for bounded waits
///
/// Matches the half-second polling cadence of classic WebDriver waits.
pub const DEFAULT_POLL_INTERVAL_MILLIS: u64 = 500;

/// Settle delay after opening an article page
pub const ARTICLE_SETTLE_SECS: u64 = 2;

/// Settle delay after triggering the institutional login control
pub const LOGIN_SETTLE_SECS: u64 = 3;

/// Settle delay after navigating to a subsequent result page
pub const PAGE_SETTLE_SECS: u64 = 3;

/// Settle delay after submitting the search form
pub const RESULTS_SETTLE_SECS: u64 = 5;

/// Environment variable naming an explicit Chrome/Chromium executable
pub const BROWSER_PATH_ENV: &str = "CHROME_PATH";

/// Fixed location of the browser driver diagnostic log
pub const DRIVER_LOG_PATH: &str = "chromium_driver.log";

/// Browser window dimensions (oversized desktop layout)
pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;

/// Timeout for individual CDP requests issued by chromiumoxide
pub const CDP_REQUEST_TIMEOUT_SECS: u64 = 30;
