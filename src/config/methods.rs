//! Fluent setters and file loading for `SessionConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::SessionConfig;
use crate::error::{ScrapeError, ScrapeResult};

impl SessionConfig {
    /// Load a session configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Io` if the file cannot be read and
    /// `ScrapeError::Config` if it is not valid JSON for this type.
    pub fn from_json_file(path: impl AsRef<Path>) -> ScrapeResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            ScrapeError::Config(format!("Invalid session config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would make waits meaningless.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Config` when the poll interval is zero or exceeds
    /// the wait timeout.
    pub fn validate(&self) -> ScrapeResult<()> {
        if self.poll_interval_millis == 0 {
            return Err(ScrapeError::Config(
                "poll_interval_millis must be greater than zero".to_string(),
            ));
        }
        if self.poll_interval() > self.wait_timeout() {
            return Err(ScrapeError::Config(format!(
                "poll interval ({}ms) exceeds wait timeout ({}s)",
                self.poll_interval_millis, self.wait_timeout_secs
            )));
        }
        if self.portal_url.trim().is_empty() {
            return Err(ScrapeError::Config("portal_url cannot be empty".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_browser_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.browser_executable = Some(path.into());
        self
    }

    /// Reuse a persistent browser profile (e.g. an already logged-in one)
    #[must_use]
    pub fn with_user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_portal_url(mut self, url: impl Into<String>) -> Self {
        self.portal_url = url.into();
        self
    }

    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout_secs = timeout.as_secs();
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set every settle delay to zero. Useful with local fixtures.
    #[must_use]
    pub fn without_settle_delays(mut self) -> Self {
        self.article_settle_secs = 0;
        self.login_settle_secs = 0;
        self.page_settle_secs = 0;
        self.results_settle_secs = 0;
        self
    }
}
