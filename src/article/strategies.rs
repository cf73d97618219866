//! Ordered content-container strategies
//!
//! Each strategy names a likely article container. The first container it
//! matches contributes the text of its paragraphs; the first strategy that
//! yields non-empty text wins.

use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::sync::LazyLock;

static ARTICLE_TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article").expect("BUG: hardcoded selector is invalid"));

static ARTICLE_CLASS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div[class*='article']").expect("BUG: hardcoded selector is invalid")
});

static CONTENT_CLASS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div[class*='content']").expect("BUG: hardcoded selector is invalid")
});

static STORY_CLASS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div[class*='story']").expect("BUG: hardcoded selector is invalid")
});

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("BUG: hardcoded selector is invalid"));

/// A candidate article container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStrategy {
    /// `<article>` element
    ArticleTag,
    /// `div` whose class contains "article"
    ArticleClass,
    /// `div` whose class contains "content"
    ContentClass,
    /// `div` whose class contains "story"
    StoryClass,
}

impl ContentStrategy {
    /// Strategies in the order they are tried
    pub const ALL: [Self; 4] = [
        Self::ArticleTag,
        Self::ArticleClass,
        Self::ContentClass,
        Self::StoryClass,
    ];

    fn selector(self) -> &'static Selector {
        match self {
            Self::ArticleTag => &ARTICLE_TAG,
            Self::ArticleClass => &ARTICLE_CLASS,
            Self::ContentClass => &CONTENT_CLASS,
            Self::StoryClass => &STORY_CLASS,
        }
    }

    /// Paragraph text of the first matching container, `None` when the
    /// container is missing or has no non-empty paragraph
    #[must_use]
    pub fn apply(self, document: &Html) -> Option<String> {
        let container = document.select(self.selector()).next()?;
        let text = paragraph_text(container);
        (!text.is_empty()).then_some(text)
    }
}

impl fmt::Display for ContentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ArticleTag => "article",
            Self::ArticleClass => "div.article*",
            Self::ContentClass => "div.content*",
            Self::StoryClass => "div.story*",
        };
        f.write_str(name)
    }
}

fn paragraph_text(container: ElementRef<'_>) -> String {
    container
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the strategies over a page source in order.
///
/// Returns the winning strategy together with its text.
#[must_use]
pub fn content_from_html(page_source: &str) -> Option<(ContentStrategy, String)> {
    let document = Html::parse_document(page_source);
    ContentStrategy::ALL
        .into_iter()
        .find_map(|strategy| strategy.apply(&document).map(|text| (strategy, text)))
}
