use thiserror::Error;

/// Errors returned by the geocoding client.
///
/// A well-formed empty result is not an error; see
/// [`ForwardGeocode::NotFound`](crate::ForwardGeocode::NotFound) and
/// [`ReverseGeocode::NotFound`](crate::ReverseGeocode::NotFound).
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed as JSON but a field held an unusable value.
    #[error("malformed response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
