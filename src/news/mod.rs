//! Google News RSS search: the `NewsSearch` seam, its HTTP client, and feed decoding.

pub(crate) mod client;
pub(crate) mod feed;
pub(crate) mod types;

pub use client::{GoogleNewsClient, Locale, NewsError, NewsSearch};
pub use types::SearchResult;
