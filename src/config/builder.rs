//! Type-safe builder for `SearchQuery` using the typestate pattern
//!
//! The keyword and the date range are required; the builder only exposes
//! `build()` once both have been provided.

use std::marker::PhantomData;

use super::types::SearchQuery;
use crate::error::{ScrapeError, ScrapeResult};
use crate::utils::DEFAULT_MAX_ARTICLES;

// Type states for the builder
pub struct WithKeyword;
pub struct Complete;

pub struct SearchQueryBuilder<State = ()> {
    pub(crate) keyword: Option<String>,
    pub(crate) start_date: Option<String>,
    pub(crate) end_date: Option<String>,
    pub(crate) max_pages: Option<usize>,
    pub(crate) max_articles: usize,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for SearchQueryBuilder<()> {
    fn default() -> Self {
        Self {
            keyword: None,
            start_date: None,
            end_date: None,
            max_pages: None,
            max_articles: DEFAULT_MAX_ARTICLES,
            _phantom: PhantomData,
        }
    }
}

impl SearchQuery {
    /// Create a builder for configuring a `SearchQuery` with a fluent interface
    #[must_use]
    pub fn builder() -> SearchQueryBuilder<()> {
        SearchQueryBuilder::default()
    }
}

impl<State> SearchQueryBuilder<State> {
    fn transition<Next>(self) -> SearchQueryBuilder<Next> {
        SearchQueryBuilder {
            keyword: self.keyword,
            start_date: self.start_date,
            end_date: self.end_date,
            max_pages: self.max_pages,
            max_articles: self.max_articles,
            _phantom: PhantomData,
        }
    }

    /// Cap the number of result pages harvested.
    /// `0` means no cap, matching an unset value.
    #[must_use]
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Cap the number of articles visited (default 50)
    #[must_use]
    pub fn max_articles(mut self, articles: usize) -> Self {
        self.max_articles = articles;
        self
    }
}

impl SearchQueryBuilder<()> {
    pub fn keyword(mut self, keyword: impl Into<String>) -> SearchQueryBuilder<WithKeyword> {
        self.keyword = Some(keyword.into());
        self.transition()
    }
}

impl SearchQueryBuilder<WithKeyword> {
    /// Start and end dates in yyyy-mm-dd form. They are not validated locally.
    pub fn date_range(
        mut self,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> SearchQueryBuilder<Complete> {
        self.start_date = Some(start_date.into());
        self.end_date = Some(end_date.into());
        self.transition()
    }
}

impl SearchQueryBuilder<Complete> {
    /// Build the query.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Config` when the keyword is empty or whitespace-only.
    pub fn build(self) -> ScrapeResult<SearchQuery> {
        let keyword = self.keyword.unwrap_or_default();
        if keyword.trim().is_empty() {
            return Err(ScrapeError::Config(
                "Search keyword cannot be empty or whitespace-only".to_string(),
            ));
        }

        Ok(SearchQuery {
            keyword,
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            max_pages: self.max_pages,
            max_articles: self.max_articles,
        })
    }
}
