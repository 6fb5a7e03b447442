//! Nominatim response types and the result variants exposed by the client.
//!
//! Nominatim encodes coordinates as JSON strings (`"lat": "47.66"`), so the
//! raw search hit keeps them as `String` and the client converts them.

use std::collections::BTreeMap;

use revgeo_core::{Address, Coordinates};
use serde::Deserialize;

/// Outcome of a successful forward-geocoding request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardGeocode {
    /// Coordinates of the first (best-ranked) match.
    Found(Coordinates),
    /// The service answered with an empty result list.
    NotFound,
}

/// Outcome of a successful reverse-geocoding request.
#[derive(Debug, Clone, PartialEq)]
pub enum ReverseGeocode {
    Found(Address),
    /// The service answered with an `error` body, e.g. a point in the ocean.
    NotFound,
}

/// One entry of the `/search` result array.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub lat: String,
    pub lon: String,
}

/// Body of a `/reverse` response.
///
/// Either `address` is present, or `error` carries the reason nothing was found.
#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub error: Option<String>,
}
