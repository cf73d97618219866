//! Progress reporting abstraction for scrape runs
//!
//! The workflow reports two phases: result-page harvesting and article
//! visiting. `NoOpProgress` ignores both; `ConsoleProgress` draws them as
//! terminal progress bars.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

use crate::article::ArticleRecord;

/// Lifecycle hooks called by the scrape workflow
pub trait ProgressReporter: Send + Sync {
    /// Harvesting of `total_pages` result pages is about to start
    fn pages_started(&self, total_pages: usize);

    /// Result page `page` (1-based) has been harvested
    fn page_harvested(&self, page: usize);

    /// Visiting of `total_articles` articles is about to start
    fn articles_started(&self, keyword: &str, total_articles: usize);

    /// Article `index` (1-based) has been processed, successfully or not
    fn article_processed(&self, index: usize, record: &ArticleRecord);

    /// The run is over, normally or not, with `collected` records in hand
    fn finished(&self, collected: usize);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn pages_started(&self, _total_pages: usize) {}

    #[inline(always)]
    fn page_harvested(&self, _page: usize) {}

    #[inline(always)]
    fn articles_started(&self, _keyword: &str, _total_articles: usize) {}

    #[inline(always)]
    fn article_processed(&self, _index: usize, _record: &ArticleRecord) {}

    #[inline(always)]
    fn finished(&self, _collected: usize) {}
}

/// Terminal progress bars, one per phase
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn start_bar(&self, total: usize, message: String, unit: &str) {
        let template = format!("{{msg}}: {{percent:>3}}%|{{bar:40}}| {{pos}}/{{len}} {unit} [{{elapsed_precise}}]");
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(total as u64).with_style(style).with_message(message);
        self.replace(Some(bar));
    }

    fn replace(&self, next: Option<ProgressBar>) {
        let mut slot = match self.bar.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = slot.take() {
            previous.finish();
        }
        *slot = next;
    }

    /// Handle to the active bar; `ProgressBar` clones share state
    fn current(&self) -> Option<ProgressBar> {
        match self.bar.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn pages_started(&self, total_pages: usize) {
        self.start_bar(total_pages, "抓取文章資訊".to_string(), "頁");
    }

    fn page_harvested(&self, _page: usize) {
        if let Some(bar) = self.current() {
            bar.inc(1);
        }
    }

    fn articles_started(&self, keyword: &str, total_articles: usize) {
        self.start_bar(total_articles, format!("{keyword}文章爬取"), "文章");
    }

    fn article_processed(&self, _index: usize, record: &ArticleRecord) {
        if let Some(bar) = self.current() {
            if record.is_failed() {
                bar.println(format!("Article {} failed: {}", record.index, record.link));
            }
            bar.inc(1);
        }
    }

    fn finished(&self, collected: usize) {
        if let Some(bar) = self.current() {
            bar.set_message(format!("{collected} articles collected"));
        }
        self.replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_progress_survives_full_lifecycle() {
        let progress = ConsoleProgress::new();
        progress.pages_started(2);
        progress.page_harvested(1);
        progress.page_harvested(2);
        progress.articles_started("颱風", 1);
        progress.article_processed(1, &ArticleRecord::new(1, "https://udndata.com/a/1"));
        progress.finished(1);
        progress.finished(1);
        assert!(progress.bar.lock().unwrap().is_none());
    }

    #[test]
    fn advancing_without_a_bar_is_harmless() {
        let progress = ConsoleProgress::new();
        progress.article_processed(1, &ArticleRecord::failed(1, "https://udndata.com/a/1", None, "gone"));
        progress.finished(0);
    }
}
