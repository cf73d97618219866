//! Chromium-backed browser session
//!
//! Owns the chromiumoxide `Browser`, its CDP handler task and the single page
//! the workflow drives. `close()` is the one teardown path; `Drop` only
//! covers sessions that were never closed explicitly.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::driver::{BrowserDriver, ElementSnapshot, Locator};
use crate::browser_setup::{LaunchedBrowser, launch_browser};
use crate::config::SessionConfig;
use crate::error::{ScrapeError, ScrapeResult};

const SCROLL_AND_CLICK_JS: &str = "function() { this.scrollIntoView(true); this.click(); }";

struct LiveBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
    temp_profile: Option<PathBuf>,
}

/// A live chromiumoxide browser with one page
pub struct ChromiumSession {
    live: Option<LiveBrowser>,
    page: Page,
}

impl ChromiumSession {
    /// Launch the browser and open a blank page.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Launch` if no executable can be resolved, the
    /// process fails to start, or the first page cannot be created.
    pub async fn start(config: &SessionConfig) -> ScrapeResult<Self> {
        let LaunchedBrowser {
            browser,
            handler,
            temp_profile,
        } = launch_browser(config)
            .await
            .map_err(|e| ScrapeError::Launch(format!("{e:#}")))?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut live = LiveBrowser {
                    browser,
                    handler,
                    temp_profile,
                };
                shutdown(&mut live).await;
                return Err(ScrapeError::Launch(format!("Failed to create page: {e}")));
            }
        };

        info!("Browser session started");
        Ok(Self {
            live: Some(LiveBrowser {
                browser,
                handler,
                temp_profile,
            }),
            page,
        })
    }

    /// Whether `close()` has already torn the browser down
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.live.is_none()
    }

    async fn first_element(&self, locator: &Locator) -> anyhow::Result<Element> {
        let element = match locator {
            Locator::XPath(expression) => self.page.find_xpath(expression.as_str()).await,
            other => {
                let css = other
                    .to_css()
                    .ok_or_else(|| anyhow!("Locator {other} has no CSS form"))?;
                self.page.find_element(css).await
            }
        };
        element.with_context(|| format!("No element matches {locator}"))
    }

    async fn all_elements(&self, locator: &Locator) -> anyhow::Result<Vec<Element>> {
        let elements = match locator {
            Locator::XPath(expression) => self.page.find_xpaths(expression.as_str()).await,
            other => {
                let css = other
                    .to_css()
                    .ok_or_else(|| anyhow!("Locator {other} has no CSS form"))?;
                self.page.find_elements(css).await
            }
        };
        // chromiumoxide reports "no match" as an error; the trait reports it as empty
        match elements {
            Ok(elements) => Ok(elements),
            Err(e) => {
                trace!("Lookup of {} returned nothing: {}", locator, e);
                Ok(Vec::new())
            }
        }
    }
}

async fn shutdown(live: &mut LiveBrowser) {
    if let Err(e) = live.browser.close().await {
        warn!("Failed to close browser cleanly: {}", e);
    }
    if let Err(e) = live.browser.wait().await {
        warn!("Failed to wait for browser exit: {}", e);
    }
    live.handler.abort();

    if let Some(path) = live.temp_profile.take() {
        remove_temp_profile(&path);
    }
}

/// Delete a per-process profile directory. Must run after the browser exits.
fn remove_temp_profile(path: &Path) {
    debug!("Removing temporary profile {}", path.display());
    if let Err(e) = std::fs::remove_dir_all(path) {
        warn!(
            "Failed to clean up temp profile {}: {}. Manual cleanup may be required.",
            path.display(),
            e
        );
    }
}

#[async_trait]
impl BrowserDriver for ChromiumSession {
    async fn goto(&self, url: &str) -> ScrapeResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> ScrapeResult<String> {
        match self.page.url().await {
            Ok(Some(url)) => Ok(url),
            Ok(None) => Ok("about:blank".to_string()),
            Err(e) => Err(ScrapeError::Browser(format!("Failed to read page URL: {e}"))),
        }
    }

    async fn page_source(&self) -> ScrapeResult<String> {
        self.page
            .content()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to read page content: {e}")))
    }

    async fn query(&self, locator: &Locator) -> ScrapeResult<Vec<ElementSnapshot>> {
        let elements = self.all_elements(locator).await?;
        let mut snapshots = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element
                .inner_text()
                .await
                .with_context(|| format!("Failed to read text of {locator}"))?
                .unwrap_or_default();
            let href = element
                .attribute("href")
                .await
                .with_context(|| format!("Failed to read href of {locator}"))?;
            snapshots.push(ElementSnapshot {
                text: text.trim().to_string(),
                href,
            });
        }
        Ok(snapshots)
    }

    async fn click(&self, locator: &Locator) -> ScrapeResult<()> {
        let element = self.first_element(locator).await?;
        element
            .call_js_fn(SCROLL_AND_CLICK_JS, false)
            .await
            .with_context(|| format!("Script click on {locator} failed"))?;
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> ScrapeResult<()> {
        let element = self.first_element(locator).await?;
        element
            .scroll_into_view()
            .await
            .with_context(|| format!("Failed to scroll {locator} into view"))?;
        element
            .click()
            .await
            .with_context(|| format!("Failed to focus {locator}"))?;
        element
            .type_str(value)
            .await
            .with_context(|| format!("Failed to type into {locator}"))?;
        Ok(())
    }

    async fn health_check(&self) -> ScrapeResult<()> {
        let Some(live) = self.live.as_ref() else {
            return Err(ScrapeError::SessionLost("browser already closed".to_string()));
        };
        live.browser
            .version()
            .await
            .map(|_| ())
            .map_err(|e| ScrapeError::SessionLost(e.to_string()))
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        if let Some(mut live) = self.live.take() {
            info!("Closing browser");
            shutdown(&mut live).await;
            info!("Browser closed");
        }
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            warn!("ChromiumSession dropped without close() - aborting handler task");
            let LiveBrowser {
                browser,
                handler,
                temp_profile,
            } = live;
            handler.abort();
            // Kills the Chrome process; the profile is still in use until then
            drop(browser);
            if let Some(path) = temp_profile {
                remove_temp_profile(&path);
            }
        }
    }
}
