//! Getter methods for `SessionConfig` and `SearchQuery`

use std::path::PathBuf;
use std::time::Duration;

use super::types::{SearchQuery, SessionConfig};

impl SessionConfig {
    #[must_use]
    pub fn browser_executable(&self) -> Option<&PathBuf> {
        self.browser_executable.as_ref()
    }

    #[must_use]
    pub fn user_data_dir(&self) -> Option<&PathBuf> {
        self.user_data_dir.as_ref()
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis)
    }

    #[must_use]
    pub fn article_settle(&self) -> Duration {
        Duration::from_secs(self.article_settle_secs)
    }

    #[must_use]
    pub fn login_settle(&self) -> Duration {
        Duration::from_secs(self.login_settle_secs)
    }

    #[must_use]
    pub fn page_settle(&self) -> Duration {
        Duration::from_secs(self.page_settle_secs)
    }

    #[must_use]
    pub fn results_settle(&self) -> Duration {
        Duration::from_secs(self.results_settle_secs)
    }
}

impl SearchQuery {
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    /// Positive page cap, if any. A configured cap of zero reads as no cap.
    #[must_use]
    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages.filter(|&pages| pages > 0)
    }

    #[must_use]
    pub fn max_articles(&self) -> usize {
        self.max_articles
    }
}
