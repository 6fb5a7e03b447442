use thiserror::Error;

/// Errors returned by the summary client. A missing article is not an error;
/// see [`Summary::NotFound`](crate::Summary::NotFound).
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
