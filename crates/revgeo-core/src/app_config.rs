use crate::location::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub geocoder_base_url: String,
    pub summary_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Maximum number of sentences requested for a summary extract.
    pub summary_sentences: u32,
    /// Where the map falls back to when device geolocation fails.
    pub fallback_coordinates: Coordinates,
    /// Drop resolutions that complete after a newer one for the same slot.
    pub discard_stale: bool,
}
