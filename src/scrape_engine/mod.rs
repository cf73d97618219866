//! Scrape entry points
//!
//! `scrape` launches a Chromium session and runs the full workflow with it.
//! `NewsScraper` runs the same workflow over any `BrowserDriver`.

pub mod orchestrator;
pub mod progress;

pub use orchestrator::{NewsScraper, ScrapeOutcome};
pub use progress::{ConsoleProgress, NoOpProgress, ProgressReporter};

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::browser::{ChromiumSession, TokioClock, Waiter};
use crate::config::{ScrapeOptions, SearchQuery, SessionConfig};
use crate::error::ScrapeResult;

/// Launch a browser and scrape the portal for `query`.
///
/// # Errors
///
/// Fails only when the configuration is invalid or the browser cannot be
/// launched. Every later failure is reported through the outcome, after the
/// browser has been closed.
pub async fn scrape(
    config: &SessionConfig,
    query: SearchQuery,
    options: ScrapeOptions,
    progress: &dyn ProgressReporter,
) -> ScrapeResult<ScrapeOutcome> {
    config.validate()?;

    let session = ChromiumSession::start(config).await?;
    info!("Searching portal for '{}'", query.keyword());

    let waiter = Waiter::from_config(config, Arc::new(TokioClock::new()));
    let mut scraper = NewsScraper::new(session, waiter, config.clone());
    Ok(scraper.run(&query, &options, progress).await)
}

/// Scrape with default session settings and no progress output.
///
/// `max_articles` caps the articles visited; `max_pages` of `None` or
/// `Some(0)` harvests every result page.
///
/// # Errors
///
/// Fails when the keyword is blank or the browser cannot be launched.
pub async fn scrape_news(
    keyword: &str,
    start_date: &str,
    end_date: &str,
    output_file: Option<PathBuf>,
    manual_mode: bool,
    max_pages: Option<usize>,
    max_articles: usize,
) -> ScrapeResult<ScrapeOutcome> {
    let builder = SearchQuery::builder()
        .keyword(keyword)
        .date_range(start_date, end_date)
        .max_articles(max_articles);
    let query = match max_pages {
        Some(pages) => builder.max_pages(pages).build()?,
        None => builder.build()?,
    };

    let options = ScrapeOptions {
        output: output_file,
        manual_login: manual_mode,
    };

    scrape(&SessionConfig::default(), query, options, &NoOpProgress).await
}
