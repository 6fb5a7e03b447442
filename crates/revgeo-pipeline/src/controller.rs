//! Map event orchestration.
//!
//! | Event           | Slots written            | Waypoints                  |
//! |-----------------|--------------------------|----------------------------|
//! | click           | `current`, `origin`      | single                     |
//! | search result   | `current`, `destination` | single                     |
//! | geolocation fix | `current`, `origin`      | single                     |
//! | home button     | `current`, `origin`      | single, then map recenters |
//! | navigate        | none                     | pair(origin, destination)  |
//!
//! Each event runs its own resolution pipeline and nothing is cancelled. By
//! default the last pipeline to *complete* wins every slot it writes, which
//! is not necessarily the last one issued. With
//! [`ControllerOptions::discard_stale`] each pipeline carries a sequence
//! number and a completion older than a slot's last accepted write is
//! dropped along with its waypoint and marker updates.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use revgeo_core::{AppConfig, Coordinates, LocationRecord, Slot};
use revgeo_geocoding::ForwardGeocode;
use tokio::task::JoinHandle;

use crate::resolver::LocationResolver;
use crate::state::LocationStateStore;
use crate::surface::{DeviceLocator, MapEvent, MapSurface};
use crate::waypoints::{RoutingWaypointManager, Waypoints};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerOptions {
    /// Position used when the device cannot be located.
    pub fallback_coordinates: Coordinates,
    pub discard_stale: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            fallback_coordinates: Coordinates::FALLBACK,
            discard_stale: false,
        }
    }
}

impl From<&AppConfig> for ControllerOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            fallback_coordinates: config.fallback_coordinates,
            discard_stale: config.discard_stale,
        }
    }
}

/// Routes map events to the resolver, the state slots and the waypoints.
pub struct MapInteractionController<S, L> {
    resolver: LocationResolver,
    store: LocationStateStore,
    waypoints: RoutingWaypointManager,
    surface: S,
    locator: L,
    options: ControllerOptions,
    next_seq: AtomicU64,
}

impl<S, L> MapInteractionController<S, L>
where
    S: MapSurface + 'static,
    L: DeviceLocator + 'static,
{
    #[must_use]
    pub fn new(
        resolver: LocationResolver,
        surface: S,
        locator: L,
        options: ControllerOptions,
    ) -> Self {
        Self {
            resolver,
            store: LocationStateStore::new(),
            waypoints: RoutingWaypointManager::new(),
            surface,
            locator,
            options,
            next_seq: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn store(&self) -> &LocationStateStore {
        &self.store
    }

    #[must_use]
    pub fn waypoints(&self) -> &RoutingWaypointManager {
        &self.waypoints
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The record the detail panel shows when a marker is opened.
    #[must_use]
    pub fn detail(&self) -> LocationRecord {
        self.store.get(Slot::Current)
    }

    /// Runs one event to completion.
    pub async fn handle(&self, event: MapEvent) {
        match event {
            MapEvent::Click(at) => {
                self.on_click(at).await;
            }
            MapEvent::Search(query) => {
                self.on_search(&query).await;
            }
            MapEvent::SearchResult(at) => {
                self.on_search_result(at).await;
            }
            MapEvent::GeolocationFix(at) => {
                self.on_geolocation_fix(at).await;
            }
            MapEvent::HomeButton => {
                self.on_home_button().await;
            }
            MapEvent::Navigate => {
                let waypoints = self.navigate();
                tracing::debug!(points = waypoints.len(), "route requested");
            }
        }
    }

    /// Runs one event as an independent task, so several can be in flight.
    pub fn spawn(self: &Arc<Self>, event: MapEvent) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.handle(event).await })
    }

    /// Initial locate on startup: only `current` is written, then the map is
    /// centered on it.
    pub async fn start(&self) -> LocationRecord {
        let seq = self.take_seq();
        let at = self.device_position().await;
        let record = self.resolver.resolve_location(at).await;
        if self.commit(seq, &[Slot::Current], &record) {
            self.surface.recenter(record.coordinates);
        }
        record
    }

    /// Returns the written record, or `None` if it was discarded as stale.
    pub async fn on_click(&self, at: Coordinates) -> Option<LocationRecord> {
        tracing::debug!(%at, "map clicked");
        self.resolve_into(at, &[Slot::Current, Slot::Origin], true).await
    }

    /// Forward-geocodes `query` and continues as a search result. A query
    /// with no match, or a failed lookup, changes nothing.
    pub async fn on_search(&self, query: &str) -> Option<LocationRecord> {
        match self.resolver.geocoder().forward(query).await {
            Ok(ForwardGeocode::Found(at)) => self.on_search_result(at).await,
            Ok(ForwardGeocode::NotFound) => {
                tracing::warn!(query, "no coordinates found for search");
                None
            }
            Err(e) => {
                tracing::error!(query, error = %e, "search geocoding failed");
                None
            }
        }
    }

    /// Writes `destination` but only sets a single waypoint; pairing waits
    /// for [`navigate`](Self::navigate).
    pub async fn on_search_result(&self, at: Coordinates) -> Option<LocationRecord> {
        tracing::debug!(%at, "search result received");
        self.resolve_into(at, &[Slot::Current, Slot::Destination], false).await
    }

    pub async fn on_geolocation_fix(&self, at: Coordinates) -> Option<LocationRecord> {
        tracing::debug!(%at, "geolocation fix received");
        self.resolve_into(at, &[Slot::Current, Slot::Origin], true).await
    }

    pub async fn on_home_button(&self) -> Option<LocationRecord> {
        let seq = self.take_seq();
        let at = self.device_position().await;
        tracing::debug!(%at, "home button pressed");
        let record = self
            .resolve_with_seq(seq, at, &[Slot::Current, Slot::Origin], true)
            .await?;
        self.surface.recenter(record.coordinates);
        Some(record)
    }

    /// Routes between whatever `origin` and `destination` currently hold.
    /// The two are not checked against each other.
    #[must_use]
    pub fn navigate(&self) -> Waypoints {
        let origin = self.store.get(Slot::Origin);
        let destination = self.store.get(Slot::Destination);
        if origin.coordinates == destination.coordinates {
            tracing::debug!(
                at = %origin.coordinates,
                "origin and destination coincide; route will be empty"
            );
        }
        self.waypoints.set_pair(origin.coordinates, destination.coordinates);
        self.waypoints.current()
    }

    async fn resolve_into(
        &self,
        at: Coordinates,
        slots: &[Slot],
        clear_markers: bool,
    ) -> Option<LocationRecord> {
        let seq = self.take_seq();
        self.resolve_with_seq(seq, at, slots, clear_markers).await
    }

    async fn resolve_with_seq(
        &self,
        seq: u64,
        at: Coordinates,
        slots: &[Slot],
        clear_markers: bool,
    ) -> Option<LocationRecord> {
        if clear_markers {
            self.surface.clear_markers();
        }

        let record = self.resolver.resolve_location(at).await;
        if !self.commit(seq, slots, &record) {
            return None;
        }

        // The route follows the resolved record; the marker stays where the
        // event happened.
        self.waypoints.set_single(record.coordinates);
        self.surface.place_marker(at, record.title());
        Some(record)
    }

    /// Writes `record` to every slot. Under the stale-discard policy, returns
    /// `false` unless all slots accepted it.
    fn commit(&self, seq: u64, slots: &[Slot], record: &LocationRecord) -> bool {
        if !self.options.discard_stale {
            for &slot in slots {
                self.store.set(slot, record.clone());
            }
            return true;
        }

        let mut fresh = true;
        for &slot in slots {
            fresh &= self.store.set_if_newer(slot, seq, record.clone());
        }
        fresh
    }

    async fn device_position(&self) -> Coordinates {
        match self.locator.locate().await {
            Ok(at) => at,
            Err(e) => {
                let fallback = self.options.fallback_coordinates;
                tracing::warn!(error = %e, %fallback, "device geolocation failed, using fallback");
                fallback
            }
        }
    }

    fn take_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}
