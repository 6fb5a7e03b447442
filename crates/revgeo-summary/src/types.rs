//! `MediaWiki` `action=query&prop=extracts` response types.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Outcome of a successful summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Found(String),
    /// No page exists for the title, or the page has no usable extract.
    NotFound,
}

/// Top-level envelope: `{ "batchcomplete": "", "query": { "pages": { ... } } }`.
#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub query: QueryBody,
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    /// Keyed by page id; a missing title shows up under `"-1"`.
    #[serde(default)]
    pub pages: BTreeMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractPage {
    #[serde(default)]
    pub extract: Option<String>,
}
