//! Configuration module for news scraping
//!
//! This module provides the `SessionConfig` struct, the type-safe
//! `SearchQuery` builder and per-run `ScrapeOptions`.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{Complete, SearchQueryBuilder, WithKeyword};
pub use types::{ScrapeOptions, SearchQuery, SessionConfig};
