//! Seams to the collaborators the pipeline drives but does not own: the map
//! widget and the device's geolocation provider.

use std::future::Future;

use revgeo_core::Coordinates;
use thiserror::Error;

/// An interaction reported by the map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The user tapped the map.
    Click(Coordinates),
    /// The user submitted a free-text search; forward geocoding happens first.
    Search(String),
    /// A search already forward-geocoded to a point.
    SearchResult(Coordinates),
    /// The device reported its position.
    GeolocationFix(Coordinates),
    /// The user pressed the "back to my location" button.
    HomeButton,
    /// The user asked for a route from origin to destination.
    Navigate,
}

/// Commands the controller issues to the rendered map.
///
/// Marker bookkeeping lives here; opening the detail panel when a marker is
/// clicked is also the surface's job.
pub trait MapSurface: Send + Sync {
    fn place_marker(&self, at: Coordinates, popup_title: &str);
    fn clear_markers(&self);
    fn recenter(&self, at: Coordinates);
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("geolocation permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Source of the device's current position.
pub trait DeviceLocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}
