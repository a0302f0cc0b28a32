//! Document loading, key search and result export.

pub mod export;
mod search;
pub mod source;
mod types;

pub use search::{search, search_with, SearchOptions};
pub use source::{Document, DocumentError, Fetcher};
pub use types::{RecentSearch, SearchResult};
