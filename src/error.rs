//! Error taxonomy for scrape operations
//!
//! Fatal workflow failures, per-field degradations and export failures all
//! surface through `ScrapeError`. Per-article failures never escape the
//! article boundary; they are folded into the record instead.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for scrape operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Invalid session configuration or search query
    #[error("Configuration error: {0}")]
    Config(String),

    /// Browser executable could not be found, downloaded or launched
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// Navigation to a page failed
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// A bounded wait ran out before the element appeared
    #[error("Timed out after {}s waiting for {what}", timeout.as_secs())]
    Timeout { what: String, timeout: Duration },

    /// Any other browser communication failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// The browser session stopped answering health checks
    #[error("Browser session lost: {0}")]
    SessionLost(String),

    /// Interactive login confirmation could not be read
    #[error("Login prompt failed: {0}")]
    Prompt(String),

    /// Output file could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    /// Whether this error came from a bounded wait running out
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::Browser(format!("{err:#}"))
    }
}
