//! Short encyclopedia summaries for a place name, via the `MediaWiki` extracts API.

pub mod client;
pub mod error;
pub mod types;

pub use client::SummaryClient;
pub use error::SummaryError;
pub use types::Summary;
