//! Result-page traversal and link harvesting

use tracing::{debug, warn};

use super::types::{LinkEntry, RESULT_TITLE_SELECTOR};
use crate::browser::{BrowserDriver, Locator, Waiter};
use crate::config::SessionConfig;
use crate::error::ScrapeResult;
use crate::scrape_engine::ProgressReporter;
use crate::utils::{page_url, resolve_link};

/// Collect (title, link) pairs from result pages `1..=total_pages`.
///
/// Page 1 is the page already loaded by the search. Later pages are reached
/// by rewriting the `page=` parameter of the current URL.
///
/// # Errors
///
/// A page whose listing never renders aborts the harvest.
pub async fn harvest_links<D>(
    driver: &D,
    waiter: &Waiter,
    config: &SessionConfig,
    total_pages: usize,
    progress: &dyn ProgressReporter,
) -> ScrapeResult<Vec<LinkEntry>>
where
    D: BrowserDriver + ?Sized,
{
    let titles = Locator::css(RESULT_TITLE_SELECTOR);
    let mut links = Vec::new();

    progress.pages_started(total_pages);

    for page in 1..=total_pages {
        if page > 1 {
            let current = driver.current_url().await?;
            let next = page_url(&current, page);
            debug!("Moving to result page {}: {}", page, next);
            driver.goto(&next).await?;
            waiter.settle(config.page_settle()).await;
        }

        let anchors = waiter.until_all_present(driver, &titles).await?;
        let base = driver.current_url().await?;

        for anchor in anchors {
            match anchor.href.as_deref().and_then(|href| resolve_link(&base, href)) {
                Some(link) => links.push(LinkEntry::new(anchor.text, link)),
                None => warn!(
                    "Skipping result '{}' on page {}: no usable href",
                    anchor.text, page
                ),
            }
        }

        progress.page_harvested(page);
    }

    Ok(links)
}

/// Keep at most `max_articles` links, earliest first
#[must_use]
pub fn limit_links(mut links: Vec<LinkEntry>, max_articles: usize) -> Vec<LinkEntry> {
    links.truncate(max_articles);
    links
}
