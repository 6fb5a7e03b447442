//! Terminal stand-ins for the map widget and the device locator.

use revgeo_core::Coordinates;
use revgeo_pipeline::{DeviceLocator, GeolocationError, MapSurface};

/// Logs every map command instead of drawing it.
#[derive(Debug, Default)]
pub(crate) struct LoggingSurface;

impl MapSurface for LoggingSurface {
    fn place_marker(&self, at: Coordinates, popup_title: &str) {
        tracing::info!(%at, title = popup_title, "marker placed");
    }

    fn clear_markers(&self) {
        tracing::debug!("markers cleared");
    }

    fn recenter(&self, at: Coordinates) {
        tracing::info!(%at, "map recentered");
    }
}

/// Reports a position given on the command line, or no fix at all.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedLocator(pub(crate) Option<Coordinates>);

impl DeviceLocator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        self.0.ok_or_else(|| {
            GeolocationError::Unavailable("no device position on the command line".to_string())
        })
    }
}
