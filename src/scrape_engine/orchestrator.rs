//! Main scrape orchestration logic
//!
//! Coordinates one scrape run:
//! - search submission and result sizing
//! - result-page harvesting and the article cap
//! - sequential per-article extraction with per-article isolation
//! - normal or partial export, then a single browser teardown

use std::path::PathBuf;
use tracing::{error, info, warn};

use super::progress::ProgressReporter;
use crate::article::fetch_article;
use crate::browser::{BrowserDriver, Waiter};
use crate::config::{ScrapeOptions, SearchQuery, SessionConfig};
use crate::error::{ScrapeError, ScrapeResult};
use crate::export::ResultSet;
use crate::news_search::{LoginPrompt, StdinPrompt, harvest_links, limit_links, perform_search};

/// What a run produced
///
/// The collected records are always returned. A fatal abort is reported in
/// `failure` next to whatever was collected before it.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub results: ResultSet,
    pub failure: Option<ScrapeError>,
    /// File the results were written to, if any
    pub saved_to: Option<PathBuf>,
}

impl ScrapeOutcome {
    /// Run aborted after collecting at least one record
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.failure.is_some() && !self.results.is_empty()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Drives one browser session through a complete scrape
pub struct NewsScraper<D: BrowserDriver> {
    driver: D,
    waiter: Waiter,
    config: SessionConfig,
    prompt: Box<dyn LoginPrompt>,
    closed: bool,
}

impl<D: BrowserDriver> NewsScraper<D> {
    /// Scraper over an already started driver.
    ///
    /// Manual login confirmations are read from stdin unless another
    /// prompt is installed with [`Self::with_login_prompt`].
    pub fn new(driver: D, waiter: Waiter, config: SessionConfig) -> Self {
        Self {
            driver,
            waiter,
            config,
            prompt: Box::new(StdinPrompt),
            closed: false,
        }
    }

    #[must_use]
    pub fn with_login_prompt(mut self, prompt: impl LoginPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run the whole workflow, export, and tear the browser down.
    ///
    /// Never fails: fatal errors are carried in the outcome.
    pub async fn run(
        &mut self,
        query: &SearchQuery,
        options: &ScrapeOptions,
        progress: &dyn ProgressReporter,
    ) -> ScrapeOutcome {
        let mut results = ResultSet::new();

        let outcome = match self.collect(query, options, progress, &mut results).await {
            Ok(()) => finish(results, options),
            Err(e) => finish_partial(results, options, e),
        };

        self.close().await;
        progress.finished(outcome.results.len());
        outcome
    }

    async fn collect(
        &self,
        query: &SearchQuery,
        options: &ScrapeOptions,
        progress: &dyn ProgressReporter,
        results: &mut ResultSet,
    ) -> ScrapeResult<()> {
        let summary = perform_search(
            &self.driver,
            &self.waiter,
            &self.config,
            query,
            options.manual_login,
            self.prompt.as_ref(),
        )
        .await?;

        let links = harvest_links(
            &self.driver,
            &self.waiter,
            &self.config,
            summary.total_pages,
            progress,
        )
        .await?;
        let links = limit_links(links, query.max_articles());
        info!("Collected {} article links", links.len());

        progress.articles_started(query.keyword(), links.len());
        let total = links.len();

        for (offset, entry) in links.iter().enumerate() {
            let index = offset + 1;

            self.driver.health_check().await.map_err(|e| match e {
                lost @ ScrapeError::SessionLost(_) => lost,
                other => ScrapeError::SessionLost(other.to_string()),
            })?;

            let record = fetch_article(&self.driver, &self.waiter, &self.config, index, total, entry).await;
            progress.article_processed(index, &record);
            results.push(record);
        }

        Ok(())
    }

    /// Tear the browser down. Only the first call reaches the driver.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        match self.driver.close().await {
            Ok(()) => info!("Browser closed"),
            Err(e) => warn!("Error while closing browser: {}", e),
        }
    }
}

fn finish(results: ResultSet, options: &ScrapeOptions) -> ScrapeOutcome {
    if results.is_empty() {
        info!("No news content extracted");
    }

    let mut outcome = ScrapeOutcome {
        results,
        failure: None,
        saved_to: None,
    };

    if let Some(path) = &options.output {
        match outcome.results.write_csv(path) {
            Ok(()) => {
                info!(
                    "Successfully saved {} articles to {}",
                    outcome.results.len(),
                    path.display()
                );
                outcome.saved_to = Some(path.clone());
            }
            Err(e) => {
                error!("Failed to save results to {}: {}", path.display(), e);
                outcome.failure = Some(e);
            }
        }
    }

    outcome
}

fn finish_partial(results: ResultSet, options: &ScrapeOptions, failure: ScrapeError) -> ScrapeOutcome {
    error!("Scrape aborted: {}", failure);

    let mut saved_to = None;
    if let Some(path) = options.output.as_ref().filter(|_| !results.is_empty()) {
        match results.write_csv(path) {
            Ok(()) => {
                info!(
                    "Saved partial data ({} articles) to {}",
                    results.len(),
                    path.display()
                );
                saved_to = Some(path.clone());
            }
            Err(e) => error!("Failed to save partial data to {}: {}", path.display(), e),
        }
    }

    ScrapeOutcome {
        results,
        failure: Some(failure),
        saved_to,
    }
}
