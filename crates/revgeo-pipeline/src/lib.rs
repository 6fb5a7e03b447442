//! Location resolution and map-interaction pipeline.
//!
//! Turns map events (click, search, geolocation fix) into resolved
//! [`LocationRecord`](revgeo_core::LocationRecord)s, writes them into the
//! shared `current` / `origin` / `destination` slots, and keeps the routing
//! waypoints in step with those slots.

pub mod controller;
pub mod error;
pub mod resolver;
pub mod state;
pub mod surface;
pub mod waypoints;

pub use controller::{ControllerOptions, MapInteractionController};
pub use error::PipelineError;
pub use resolver::LocationResolver;
pub use state::{LocationSnapshot, LocationStateStore};
pub use surface::{DeviceLocator, GeolocationError, MapEvent, MapSurface};
pub use waypoints::{RoutingWaypointManager, Waypoints};
