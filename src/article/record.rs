//! Per-article record
//!
//! Missing data stays `None` in memory. Placeholder text is produced only
//! when a record is rendered for export.

use serde::{Deserialize, Serialize};

pub const UNKNOWN_ID: &str = "Unknown ID";
pub const UNKNOWN_DATE: &str = "Unknown date";
pub const CONTENT_FAILED: &str = "Content extraction failed";

/// One visited article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// 1-based position in the visit order
    pub index: usize,
    /// Article URL that was visited
    pub link: String,
    pub news_id: Option<String>,
    pub title: Option<String>,
    /// yyyy-mm-dd
    pub date: Option<String>,
    pub content: Option<String>,
    /// Set when the article as a whole could not be processed
    pub failure: Option<String>,
}

impl ArticleRecord {
    /// Empty record for `link`; every field still to be extracted
    #[must_use]
    pub fn new(index: usize, link: impl Into<String>) -> Self {
        Self {
            index,
            link: link.into(),
            news_id: None,
            title: None,
            date: None,
            content: None,
            failure: None,
        }
    }

    /// Record for an article whose processing failed outright
    #[must_use]
    pub fn failed(index: usize, link: impl Into<String>, news_id: Option<String>, reason: impl Into<String>) -> Self {
        Self {
            news_id,
            failure: Some(reason.into()),
            ..Self::new(index, link)
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    #[must_use]
    pub fn news_id_or_sentinel(&self) -> String {
        self.news_id.clone().unwrap_or_else(|| UNKNOWN_ID.to_string())
    }

    #[must_use]
    pub fn title_or_sentinel(&self) -> String {
        match (&self.title, &self.failure) {
            (Some(title), _) => title.clone(),
            (None, Some(_)) => format!("Article {} (processing failed)", self.index),
            (None, None) => format!("Article {} (title extraction failed)", self.index),
        }
    }

    #[must_use]
    pub fn date_or_sentinel(&self) -> String {
        self.date.clone().unwrap_or_else(|| UNKNOWN_DATE.to_string())
    }

    #[must_use]
    pub fn content_or_sentinel(&self) -> String {
        match (&self.content, &self.failure) {
            (Some(content), _) => content.clone(),
            (None, Some(reason)) => format!("{CONTENT_FAILED}: {reason}"),
            (None, None) => CONTENT_FAILED.to_string(),
        }
    }

    /// Row in the fixed export column order
    #[must_use]
    pub fn to_row(&self) -> [String; 4] {
        [
            self.news_id_or_sentinel(),
            self.title_or_sentinel(),
            self.date_or_sentinel(),
            self.content_or_sentinel(),
        ]
    }
}
