//! Test utilities shared by the udn_newsscrape integration tests
//!
//! `FakePortal` is an in-memory `BrowserDriver`: it serves fixed HTML pages
//! by URL and answers CSS/id/tag locators with `scraper`. An XPath is only
//! answered when a CSS equivalent was registered with `with_xpath_alias`;
//! every other XPath lookup fails.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use udn_newsscrape::news_search::types::LOGIN_TRIGGER_XPATH;
use udn_newsscrape::{
    BrowserDriver, ElementSnapshot, Locator, ManualClock, ScrapeError, ScrapeResult,
    SessionConfig, Waiter,
};

pub const PORTAL_URL: &str = "https://udndata.com/ndapp/Index?cp=udn";

#[allow(dead_code)]
pub const RESULTS_URL: &str = "https://udndata.com/ndapp/Searchdec?udndbid=udnfree&page=1";

#[derive(Default)]
struct PortalState {
    pages: HashMap<String, String>,
    current: Option<String>,
    click_targets: Vec<(Locator, String)>,
    xpath_aliases: HashMap<String, String>,
    filled: Vec<(Locator, String)>,
    visited: Vec<String>,
    unreachable: HashSet<String>,
    broken_source: HashSet<String>,
    health_checks: usize,
    alive_for: Option<usize>,
    close_calls: usize,
}

/// In-memory portal; clones share state so tests can inspect it after a run
#[derive(Clone, Default)]
pub struct FakePortal {
    state: Arc<Mutex<PortalState>>,
}

#[allow(dead_code)]
impl FakePortal {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PortalState> {
        self.state.lock().expect("portal state poisoned")
    }

    pub fn with_page(self, url: &str, html: impl Into<String>) -> Self {
        self.state().pages.insert(url.to_string(), html.into());
        self
    }

    /// Clicking `locator` navigates to `url`
    pub fn with_click_target(self, locator: Locator, url: &str) -> Self {
        self.state().click_targets.push((locator, url.to_string()));
        self
    }

    /// Answer `xpath` as if it were the CSS selector `css`
    pub fn with_xpath_alias(self, xpath: &str, css: &str) -> Self {
        self.state()
            .xpath_aliases
            .insert(xpath.to_string(), css.to_string());
        self
    }

    /// Navigation to `url` fails
    pub fn with_unreachable(self, url: &str) -> Self {
        self.state().unreachable.insert(url.to_string());
        self
    }

    /// `page_source` fails while `url` is loaded
    pub fn with_broken_source(self, url: &str) -> Self {
        self.state().broken_source.insert(url.to_string());
        self
    }

    /// Health checks succeed `n` times, then the session is gone
    pub fn alive_for(self, n: usize) -> Self {
        self.state().alive_for = Some(n);
        self
    }

    pub fn close_calls(&self) -> usize {
        self.state().close_calls
    }

    pub fn health_checks(&self) -> usize {
        self.state().health_checks
    }

    pub fn visited(&self) -> Vec<String> {
        self.state().visited.clone()
    }

    pub fn filled(&self) -> Vec<(Locator, String)> {
        self.state().filled.clone()
    }

    fn current_html(&self) -> ScrapeResult<(String, String)> {
        let state = self.state();
        let url = state
            .current
            .clone()
            .ok_or_else(|| ScrapeError::Browser("no page loaded".to_string()))?;
        let html = state.pages.get(&url).cloned().unwrap_or_default();
        Ok((url, html))
    }

    fn to_css(&self, locator: &Locator) -> ScrapeResult<String> {
        let css = match locator {
            Locator::XPath(expression) => self.state().xpath_aliases.get(expression).cloned(),
            other => other.to_css(),
        };
        css.ok_or_else(|| ScrapeError::Browser(format!("unsupported locator {locator}")))
    }

    fn select(&self, locator: &Locator) -> ScrapeResult<Vec<ElementSnapshot>> {
        let (_, html) = self.current_html()?;
        let css = self.to_css(locator)?;
        select(&html, &css)
    }
}

/// Parse and select in one synchronous scope
fn select(html: &str, css: &str) -> ScrapeResult<Vec<ElementSnapshot>> {
    let selector = Selector::parse(css)
        .map_err(|e| ScrapeError::Browser(format!("bad selector {css}: {e:?}")))?;
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .map(|el| ElementSnapshot {
            text: el.text().collect::<String>().trim().to_string(),
            href: el.value().attr("href").map(str::to_string),
        })
        .collect())
}

#[async_trait]
impl BrowserDriver for FakePortal {
    async fn goto(&self, url: &str) -> ScrapeResult<()> {
        let mut state = self.state();
        state.visited.push(url.to_string());
        if state.unreachable.contains(url) || !state.pages.contains_key(url) {
            return Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        state.current = Some(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> ScrapeResult<String> {
        self.current_html().map(|(url, _)| url)
    }

    async fn page_source(&self) -> ScrapeResult<String> {
        let (url, html) = self.current_html()?;
        if self.state().broken_source.contains(&url) {
            return Err(ScrapeError::Browser("target crashed".to_string()));
        }
        Ok(html)
    }

    async fn query(&self, locator: &Locator) -> ScrapeResult<Vec<ElementSnapshot>> {
        self.select(locator)
    }

    async fn click(&self, locator: &Locator) -> ScrapeResult<()> {
        if self.select(locator)?.is_empty() {
            return Err(ScrapeError::Browser(format!("nothing to click for {locator}")));
        }
        let target = self
            .state()
            .click_targets
            .iter()
            .find(|(l, _)| l == locator)
            .map(|(_, url)| url.clone());
        match target {
            Some(url) => self.goto(&url).await,
            None => Ok(()),
        }
    }

    async fn fill(&self, locator: &Locator, value: &str) -> ScrapeResult<()> {
        if self.select(locator)?.is_empty() {
            return Err(ScrapeError::Browser(format!("nothing to fill for {locator}")));
        }
        self.state().filled.push((locator.clone(), value.to_string()));
        Ok(())
    }

    async fn health_check(&self) -> ScrapeResult<()> {
        let mut state = self.state();
        state.health_checks += 1;
        match state.alive_for {
            Some(limit) if state.health_checks > limit => {
                Err(ScrapeError::SessionLost("browser process exited".to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        self.state().close_calls += 1;
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

#[allow(dead_code)]
pub fn landing_page() -> String {
    r#"<html><body>
        <a href="/ndapp/IPLogin">定址登入</a>
        <form>
          <input id="SearchString" name="SearchString">
          <input id="datepicker-start">
          <input id="datepicker-end">
          <button name="submit" type="submit">搜尋</button>
        </form>
    </body></html>"#
        .to_string()
}

/// Result listing page with `ids` as article news IDs
#[allow(dead_code)]
pub fn results_page(total_results: usize, ids: &[usize]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li><h2 class="control-pic"><a href="/ndapp/Story?news_id={id}">新聞 {id}</a></h2></li>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <div class="message">共搜尋到 <span class="mark">{total_results}</span>筆資料</div>
        <ul>{items}</ul>
    </body></html>"#
    )
}

#[allow(dead_code)]
pub fn article_url(id: usize) -> String {
    format!("https://udndata.com/ndapp/Story?news_id={id}")
}

#[allow(dead_code)]
pub fn article_page(id: usize) -> String {
    format!(
        r#"<html><body>
        <nav>Home News Sports</nav>
        <h1>標題 {id}</h1>
        <span class="story-source">2024-01-15/聯合報/A{id}版</span>
        <article><p>第 {id} 篇第一段</p><p>第二段</p></article>
    </body></html>"#
    )
}

/// Portal with 20 result links per page (fewer on the last) whose login
/// trigger resolves
#[allow(dead_code)]
pub fn portal_with_results(total_results: usize) -> FakePortal {
    let pages = total_results.div_ceil(20);
    let mut portal = FakePortal::new()
        .with_page(PORTAL_URL, landing_page())
        .with_xpath_alias(LOGIN_TRIGGER_XPATH, "a[href='/ndapp/IPLogin']")
        .with_click_target(Locator::css("button[name='submit']"), RESULTS_URL);

    if pages == 0 {
        return portal.with_page(RESULTS_URL, results_page(0, &[]));
    }

    for page in 1..=pages {
        let first = (page - 1) * 20 + 1;
        let last = (page * 20).min(total_results);
        let ids: Vec<usize> = (first..=last).collect();
        let url = RESULTS_URL.replace("page=1", &format!("page={page}"));
        portal = portal.with_page(&url, results_page(total_results, &ids));
        for id in ids {
            portal = portal.with_page(&article_url(id), article_page(id));
        }
    }
    portal
}

#[allow(dead_code)]
pub fn test_config() -> SessionConfig {
    SessionConfig::default().with_portal_url(PORTAL_URL)
}

/// Waiter on virtual time with the default 10s/500ms bounds
#[allow(dead_code)]
pub fn test_waiter() -> (Waiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let waiter = Waiter::new(clock.clone(), Duration::from_secs(10), Duration::from_millis(500));
    (waiter, clock)
}
