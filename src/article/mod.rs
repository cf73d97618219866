//! Per-article field extraction
//!
//! `fetch_article` visits one article and always produces a record. Field
//! level problems leave that field empty; a failed visit marks the whole
//! record as failed.

pub mod extractors;
pub mod record;
pub mod strategies;

pub use extractors::{date_from_byline, news_id_from_url, strip_menu_keywords};
pub use record::ArticleRecord;
pub use strategies::{ContentStrategy, content_from_html};

use tracing::{debug, info, warn};

use crate::browser::{BrowserDriver, Locator, Waiter};
use crate::config::SessionConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::news_search::LinkEntry;

/// Byline carrying the publication date
pub const BYLINE_SELECTOR: &str = "span[class='story-source']";

/// Visit `entry.link` and extract its fields.
///
/// `index` is the 1-based visit position and `total` the number of articles
/// scheduled for this run (used in log output only).
pub async fn fetch_article<D>(
    driver: &D,
    waiter: &Waiter,
    config: &SessionConfig,
    index: usize,
    total: usize,
    entry: &LinkEntry,
) -> ArticleRecord
where
    D: BrowserDriver + ?Sized,
{
    info!("Processing article {}/{}: {}", index, total, entry.title);

    let news_id = news_id_from_url(&entry.link);

    if let Err(e) = driver.goto(&entry.link).await {
        warn!("Error processing article {}: {}", index, e);
        return ArticleRecord::failed(index, &entry.link, news_id, e.to_string());
    }
    waiter.settle(config.article_settle()).await;

    let mut record = ArticleRecord::new(index, &entry.link);
    record.news_id = news_id;
    record.title = extract_title(driver, waiter).await;
    record.date = extract_date(driver, waiter).await;
    record.content = match extract_content(driver).await {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("Content extraction failed for article {}: {}", index, e);
            None
        }
    };

    record
}

async fn extract_title<D>(driver: &D, waiter: &Waiter) -> Option<String>
where
    D: BrowserDriver + ?Sized,
{
    match waiter.until_present(driver, &Locator::tag("h1")).await {
        Ok(heading) => Some(heading.text),
        Err(e) => {
            debug!("No title: {}", e);
            None
        }
    }
}

async fn extract_date<D>(driver: &D, waiter: &Waiter) -> Option<String>
where
    D: BrowserDriver + ?Sized,
{
    match waiter.until_present(driver, &Locator::css(BYLINE_SELECTOR)).await {
        Ok(byline) => date_from_byline(&byline.text),
        Err(e) => {
            debug!("No byline: {}", e);
            None
        }
    }
}

/// Container strategies first, then the whole page body minus menu words
async fn extract_content<D>(driver: &D) -> ScrapeResult<String>
where
    D: BrowserDriver + ?Sized,
{
    let source = driver.page_source().await?;
    if let Some((strategy, text)) = content_from_html(&source) {
        debug!("Content taken from {}", strategy);
        return Ok(text);
    }

    debug!("No content container matched, falling back to page body");
    let body = driver.query(&Locator::tag("body")).await?;
    let body = body
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::Browser("page has no body element".to_string()))?;
    Ok(strip_menu_keywords(&body.text))
}
