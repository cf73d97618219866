//! Browser capability consumed by the scrape workflow
//!
//! The workflow only ever talks to a `BrowserDriver`. The chromiumoxide
//! session implements it for real runs; tests drive the same workflow with
//! an in-memory double.

use async_trait::async_trait;
use std::fmt;

use crate::error::ScrapeResult;

/// How to find elements on the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Element id, without the leading `#`
    Id(String),
    /// Tag name such as `h1` or `body`
    Tag(String),
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// CSS form of this locator, if it has one.
    /// XPath locators return `None`.
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Id(id) => Some(format!("[id='{id}']")),
            Self::Tag(tag) => Some(tag.clone()),
            Self::Css(selector) => Some(selector.clone()),
            Self::XPath(_) => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Tag(tag) => write!(f, "<{tag}>"),
            Self::Css(selector) => write!(f, "css `{selector}`"),
            Self::XPath(expression) => write!(f, "xpath `{expression}`"),
        }
    }
}

/// What the workflow reads from a matched element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Rendered text of the element
    pub text: String,
    /// Raw `href` attribute, if present
    pub href: Option<String>,
}

/// A live, exclusively owned browser page
///
/// All lookups act on the page most recently navigated to. `query` returns
/// matches in document order and an empty vector when nothing matches.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate the page to `url`
    async fn goto(&self, url: &str) -> ScrapeResult<()>;

    /// URL of the page currently loaded
    async fn current_url(&self) -> ScrapeResult<String>;

    /// Rendered HTML of the current page
    async fn page_source(&self) -> ScrapeResult<String>;

    /// Snapshot every element matching `locator`
    async fn query(&self, locator: &Locator) -> ScrapeResult<Vec<ElementSnapshot>>;

    /// Scroll the first match into view and click it through script
    async fn click(&self, locator: &Locator) -> ScrapeResult<()>;

    /// Scroll the first match into view and type `value` into it
    async fn fill(&self, locator: &Locator, value: &str) -> ScrapeResult<()>;

    /// Fails when the browser no longer answers
    async fn health_check(&self) -> ScrapeResult<()>;

    /// Terminate the browser.
    ///
    /// Idempotent: only the first call tears anything down.
    async fn close(&mut self) -> ScrapeResult<()>;
}
