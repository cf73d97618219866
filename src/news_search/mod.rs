//! Portal search workflow
//!
//! Submits the keyword/date search, sizes the result set and harvests
//! article links across result pages.

pub mod pagination;
pub mod prompt;
pub mod search;
pub mod types;

pub use pagination::{harvest_links, limit_links};
pub use prompt::{AutoConfirm, LoginPrompt, StdinPrompt};
pub use search::{parse_total_results, perform_search, total_pages, trigger_login};
pub use types::{LinkEntry, SearchSummary};
