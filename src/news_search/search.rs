//! Core search execution logic
//!
//! Drives the portal from its landing page to a rendered result list and
//! works out how many result pages to harvest.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

use super::prompt::LoginPrompt;
use super::types::{
    END_DATE_INPUT_ID, KEYWORD_INPUT_ID, LOGIN_TRIGGER_XPATH, RESULT_MESSAGE_SELECTOR,
    START_DATE_INPUT_ID, SUBMIT_BUTTON_SELECTOR, SearchSummary, TOTAL_RESULTS_PATTERN,
};
use crate::browser::{BrowserDriver, Locator, Waiter};
use crate::config::{SearchQuery, SessionConfig};
use crate::error::{ScrapeError, ScrapeResult};
use crate::utils::RESULTS_PER_PAGE;

static TOTAL_RESULTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(TOTAL_RESULTS_PATTERN).expect("BUG: hardcoded total-results regex is invalid")
});

/// Total hit count announced in the result page source, 0 when absent
#[must_use]
pub fn parse_total_results(page_source: &str) -> usize {
    TOTAL_RESULTS
        .captures(page_source)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// `ceil(total_results / 20)`, clamped to `max_pages` when one is given
#[must_use]
pub fn total_pages(total_results: usize, max_pages: Option<usize>) -> usize {
    let pages = total_results.div_ceil(RESULTS_PER_PAGE);
    match max_pages {
        Some(cap) if cap > 0 => pages.min(cap),
        _ => pages,
    }
}

/// Click the institutional login trigger, pausing for a human if asked to.
///
/// Never fails: the search often works without it, so problems are logged.
pub async fn trigger_login<D>(
    driver: &D,
    waiter: &Waiter,
    config: &SessionConfig,
    manual_login: bool,
    prompt: &dyn LoginPrompt,
) where
    D: BrowserDriver + ?Sized,
{
    let attempt = async {
        let trigger = Locator::xpath(LOGIN_TRIGGER_XPATH);
        waiter.until_present(driver, &trigger).await?;
        driver.click(&trigger).await?;
        waiter.settle(config.login_settle()).await;
        if manual_login {
            prompt
                .wait_for_confirmation(
                    "Please complete the login process in the browser and press Enter to continue...",
                )
                .await?;
        }
        Ok::<(), ScrapeError>(())
    };

    if let Err(e) = attempt.await {
        warn!("Error when clicking 'IP Login': {}", e);
        warn!("Continuing with search process...");
    }
}

async fn fill_field<D>(driver: &D, waiter: &Waiter, locator: &Locator, value: &str) -> ScrapeResult<()>
where
    D: BrowserDriver + ?Sized,
{
    waiter.until_present(driver, locator).await?;
    driver.fill(locator, value).await
}

/// Run the whole search workflow and size the harvest.
///
/// # Errors
///
/// Navigation, field population, submission and the result message wait
/// are fatal. The login step is not.
pub async fn perform_search<D>(
    driver: &D,
    waiter: &Waiter,
    config: &SessionConfig,
    query: &SearchQuery,
    manual_login: bool,
    prompt: &dyn LoginPrompt,
) -> ScrapeResult<SearchSummary>
where
    D: BrowserDriver + ?Sized,
{
    let portal = config.portal_url();

    driver.goto(portal).await?;
    info!("Opened UDN News search page");

    trigger_login(driver, waiter, config, manual_login, prompt).await;

    // Reload the portal so the (possibly) authenticated session applies
    driver.goto(portal).await?;

    fill_field(driver, waiter, &Locator::id(KEYWORD_INPUT_ID), query.keyword()).await?;
    info!("Entered keyword: {}", query.keyword());

    fill_field(driver, waiter, &Locator::id(START_DATE_INPUT_ID), query.start_date()).await?;
    fill_field(driver, waiter, &Locator::id(END_DATE_INPUT_ID), query.end_date()).await?;
    info!(
        "Entered date range: {} ~ {}",
        query.start_date(),
        query.end_date()
    );

    let submit = Locator::css(SUBMIT_BUTTON_SELECTOR);
    waiter.until_present(driver, &submit).await?;
    driver.click(&submit).await?;
    info!("Clicked search button");

    waiter.settle(config.results_settle()).await;

    waiter
        .until_present(driver, &Locator::css(RESULT_MESSAGE_SELECTOR))
        .await?;
    let source = driver.page_source().await?;
    let total_results = parse_total_results(&source);
    let total_pages = total_pages(total_results, query.max_pages());

    info!(
        "Search returned {} results; harvesting {} page(s)",
        total_results, total_pages
    );

    Ok(SearchSummary {
        total_results,
        total_pages,
    })
}
