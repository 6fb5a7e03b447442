//! Coordinates → [`LocationRecord`] resolution.

use revgeo_core::{AppConfig, Coordinates, LocationRecord, DEFAULT_SUMMARY};
use revgeo_geocoding::GeocodingClient;
use revgeo_summary::SummaryClient;

use crate::error::PipelineError;

/// Composes reverse geocoding, address parsing and summary lookup.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoder: GeocodingClient,
    summaries: SummaryClient,
}

impl LocationResolver {
    #[must_use]
    pub fn new(geocoder: GeocodingClient, summaries: SummaryClient) -> Self {
        Self {
            geocoder,
            summaries,
        }
    }

    /// Builds both HTTP clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if either client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            GeocodingClient::from_config(config)?,
            SummaryClient::from_config(config)?,
        ))
    }

    #[must_use]
    pub fn geocoder(&self) -> &GeocodingClient {
        &self.geocoder
    }

    /// Resolves a point into a complete record.
    ///
    /// Total: an unresolvable point yields [`LocationRecord::fallback`] without
    /// a summary lookup, and a failed or empty summary lookup yields
    /// [`DEFAULT_SUMMARY`]. An address without a city skips the lookup.
    pub async fn resolve_location(&self, coordinates: Coordinates) -> LocationRecord {
        let Some(address) = self.geocoder.reverse(coordinates).await else {
            tracing::warn!(%coordinates, "location unresolved, using fallback location");
            return LocationRecord::fallback();
        };

        let summary = match address.city.as_deref() {
            Some(city) => self.summaries.lookup_or_default(city).await,
            None => {
                tracing::debug!(%coordinates, "address has no city, skipping summary lookup");
                DEFAULT_SUMMARY.to_string()
            }
        };

        tracing::debug!(
            %coordinates,
            city = address.city.as_deref().unwrap_or("-"),
            "location resolved"
        );

        LocationRecord {
            coordinates,
            address,
            summary,
        }
    }
}
