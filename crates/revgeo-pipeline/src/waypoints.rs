//! The waypoint set consumed by the routing engine.
//!
//! The routing engine recomputes its whole path from the full set on every
//! change, so the set is only ever replaced wholesale: it holds zero, one or
//! two points and there is no API for editing a single entry.

use revgeo_core::Coordinates;
use serde::Serialize;
use tokio::sync::watch;

/// Ordered waypoints handed to the routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Waypoints {
    #[default]
    Empty,
    /// Show this point; no route yet.
    Single { point: Coordinates },
    /// Route from `start` to `end`, in that order.
    Pair { start: Coordinates, end: Coordinates },
}

impl Waypoints {
    #[must_use]
    pub fn to_vec(self) -> Vec<Coordinates> {
        match self {
            Waypoints::Empty => Vec::new(),
            Waypoints::Single { point } => vec![point],
            Waypoints::Pair { start, end } => vec![start, end],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Waypoints::Empty => 0,
            Waypoints::Single { .. } => 1,
            Waypoints::Pair { .. } => 2,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Waypoints::Empty)
    }
}

/// Sole owner of the [`Waypoints`]; the routing engine subscribes to changes.
#[derive(Debug)]
pub struct RoutingWaypointManager {
    tx: watch::Sender<Waypoints>,
}

impl Default for RoutingWaypointManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingWaypointManager {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Waypoints::Empty);
        Self { tx }
    }

    /// Replaces the set with `[point]`.
    pub fn set_single(&self, point: Coordinates) {
        tracing::info!(%point, "routing waypoint set");
        self.tx.send_replace(Waypoints::Single { point });
    }

    /// Replaces the set with `[start, end]`.
    pub fn set_pair(&self, start: Coordinates, end: Coordinates) {
        tracing::info!(%start, %end, "routing origin and destination set");
        self.tx.send_replace(Waypoints::Pair { start, end });
    }

    #[must_use]
    pub fn current(&self) -> Waypoints {
        *self.tx.borrow()
    }

    /// Receiver notified on every write, including writes of an equal set.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Waypoints> {
        self.tx.subscribe()
    }
}
