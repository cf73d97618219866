pub mod article;
pub mod browser;
pub mod browser_setup;
pub mod config;
pub mod error;
pub mod export;
pub mod news_search;
pub mod scrape_engine;
pub mod utils;

pub use article::{ArticleRecord, ContentStrategy};
pub use browser::{BrowserDriver, ChromiumSession, Clock, ElementSnapshot, Locator, ManualClock, TokioClock, Waiter};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{ScrapeOptions, SearchQuery, SessionConfig};
pub use error::{ScrapeError, ScrapeResult};
pub use export::ResultSet;
pub use news_search::{AutoConfirm, LinkEntry, LoginPrompt, StdinPrompt};
pub use scrape_engine::{
    ConsoleProgress, NewsScraper, NoOpProgress, ProgressReporter, ScrapeOutcome, scrape, scrape_news,
};
