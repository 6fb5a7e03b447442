//! HTTP client for the `MediaWiki` extracts endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use revgeo_core::{AppConfig, DEFAULT_SUMMARY};

use crate::error::SummaryError;
use crate::types::{ExtractResponse, Summary};

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_SENTENCES: u32 = 10;

/// Client that fetches the plain-text intro of an encyclopedia article.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    endpoint: Url,
    sentences: u32,
}

impl SummaryClient {
    /// Creates a client pointed at English Wikipedia.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SummaryError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent, DEFAULT_SENTENCES)
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`SummaryClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SummaryError> {
        Self::with_base_url(
            &config.summary_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.summary_sentences,
        )
    }

    /// Creates a client against a custom `api.php` endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SummaryError::InvalidBaseUrl`] if `endpoint` does not parse.
    pub fn with_base_url(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        sentences: u32,
    ) -> Result<Self, SummaryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(endpoint).map_err(|e| SummaryError::InvalidBaseUrl {
            base_url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint: parsed,
            sentences,
        })
    }

    /// Fetches the intro extract for `place_name`, following redirects.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::Http`] / [`SummaryError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`SummaryError::Deserialize`] if the body is not a `query` envelope.
    pub async fn lookup(&self, place_name: &str) -> Result<Summary, SummaryError> {
        let url = self.build_url(place_name);
        tracing::debug!(%url, "summary request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SummaryError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;

        let envelope: ExtractResponse =
            serde_json::from_str(&body).map_err(|e| SummaryError::Deserialize {
                context: format!("extracts(titles={place_name})"),
                source: e,
            })?;

        let extract = envelope
            .query
            .pages
            .into_values()
            .next()
            .and_then(|page| page.extract)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(extract.map_or(Summary::NotFound, Summary::Found))
    }

    /// Fetches the extract for `place_name`, substituting [`DEFAULT_SUMMARY`]
    /// on a miss or any failure.
    pub async fn lookup_or_default(&self, place_name: &str) -> String {
        match self.lookup(place_name).await {
            Ok(Summary::Found(text)) => text,
            Ok(Summary::NotFound) => {
                tracing::debug!(place = place_name, "no summary article found");
                DEFAULT_SUMMARY.to_string()
            }
            Err(e) => {
                tracing::warn!(place = place_name, error = %e, "summary lookup failed");
                DEFAULT_SUMMARY.to_string()
            }
        }
    }

    fn build_url(&self, place_name: &str) -> Url {
        let sentences = self.sentences.to_string();
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("action", "query");
            pairs.append_pair("prop", "extracts");
            pairs.append_pair("exintro", "1");
            pairs.append_pair("explaintext", "1");
            pairs.append_pair("redirects", "1");
            pairs.append_pair("exsentences", &sentences);
            pairs.append_pair("titles", place_name);
        }
        url
    }
}
