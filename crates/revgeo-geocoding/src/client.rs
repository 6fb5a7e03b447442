//! HTTP client for a Nominatim-compatible geocoding service.
//!
//! Wraps `reqwest` with typed response decoding. A well-formed empty answer
//! is reported as a `NotFound` variant; transport and decoding problems are
//! [`GeocodingError`]s. [`GeocodingClient::reverse`] collapses both into
//! `None` for callers that only care whether an address is available.

use std::time::Duration;

use reqwest::{Client, Url};
use revgeo_core::{Address, AppConfig, Coordinates};

use crate::address::parse_address;
use crate::error::GeocodingError;
use crate::types::{ForwardGeocode, ReverseGeocode, ReverseResponse, SearchHit};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Client for the Nominatim `/search` and `/reverse` endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: Url,
}

impl GeocodingClient {
    /// Creates a new client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodingError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`GeocodingClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodingError> {
        Self::with_base_url(
            &config.geocoder_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodingError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining "search" appends a segment
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GeocodingError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Looks up a free-text place name and returns the first match.
    ///
    /// # Errors
    ///
    /// - [`GeocodingError::Http`] / [`GeocodingError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`GeocodingError::Deserialize`] / [`GeocodingError::MalformedResponse`]
    ///   if the body is not a list of hits with numeric coordinates.
    pub async fn forward(&self, place_name: &str) -> Result<ForwardGeocode, GeocodingError> {
        let url = self.build_url("search", &[("format", "json"), ("q", place_name)])?;
        let body = self.request_json(&url).await?;
        let context = format!("search(q={place_name})");

        let hits: Vec<SearchHit> =
            serde_json::from_value(body).map_err(|e| GeocodingError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let Some(first) = hits.first() else {
            tracing::debug!(query = place_name, "forward geocoding returned no results");
            return Ok(ForwardGeocode::NotFound);
        };

        let coordinates = parse_hit(first, &context)?;
        tracing::debug!(
            query = place_name,
            lat = coordinates.lat,
            lng = coordinates.lng,
            candidates = hits.len(),
            "forward geocoding resolved"
        );
        Ok(ForwardGeocode::Found(coordinates))
    }

    /// Resolves a point into its address components.
    ///
    /// # Errors
    ///
    /// - [`GeocodingError::Http`] / [`GeocodingError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`GeocodingError::Deserialize`] if the body is not a JSON object of
    ///   the expected shape.
    /// - [`GeocodingError::MalformedResponse`] if the body carries neither an
    ///   `address` nor an `error` field.
    pub async fn reverse_lookup(
        &self,
        coordinates: Coordinates,
    ) -> Result<ReverseGeocode, GeocodingError> {
        let lat = coordinates.lat.to_string();
        let lon = coordinates.lng.to_string();
        let url = self.build_url("reverse", &[("format", "json"), ("lat", &lat), ("lon", &lon)])?;
        let body = self.request_json(&url).await?;
        let context = format!("reverse(lat={lat}, lon={lon})");

        let response: ReverseResponse =
            serde_json::from_value(body).map_err(|e| GeocodingError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        match (response.address, response.error) {
            (Some(components), _) => Ok(ReverseGeocode::Found(parse_address(&components))),
            (None, Some(reason)) => {
                tracing::debug!(%coordinates, %reason, "reverse geocoding found nothing");
                Ok(ReverseGeocode::NotFound)
            }
            (None, None) => Err(GeocodingError::MalformedResponse {
                context,
                reason: "response has neither `address` nor `error`".to_string(),
            }),
        }
    }

    /// Resolves a point into an [`Address`], or `None` if that is not possible.
    ///
    /// Never fails: transport errors, malformed bodies and not-found answers
    /// are logged and reported as `None`. There is no retry.
    pub async fn reverse(&self, coordinates: Coordinates) -> Option<Address> {
        match self.reverse_lookup(coordinates).await {
            Ok(ReverseGeocode::Found(address)) => Some(address),
            Ok(ReverseGeocode::NotFound) => {
                tracing::warn!(%coordinates, "no address found for coordinates");
                None
            }
            Err(e) => {
                tracing::warn!(%coordinates, error = %e, "reverse geocoding failed");
                None
            }
        }
    }

    /// Builds an endpoint URL with percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, GeocodingError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| GeocodingError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, GeocodingError> {
        tracing::debug!(%url, "geocoding request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodingError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Converts the string-typed coordinates of a search hit.
fn parse_hit(hit: &SearchHit, context: &str) -> Result<Coordinates, GeocodingError> {
    let malformed = |reason: String| GeocodingError::MalformedResponse {
        context: context.to_string(),
        reason,
    };

    let lat = hit
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| malformed(format!("lat '{}': {e}", hit.lat)))?;
    let lng = hit
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| malformed(format!("lon '{}': {e}", hit.lon)))?;

    Coordinates::new(lat, lng).map_err(|e| malformed(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
