//! Shared `current` / `origin` / `destination` location slots.
//!
//! A passive table: it performs no validation and enforces no relation
//! between slots. Each slot is an independent `watch` channel, so UI
//! consumers can read the latest record or await the next change.

use std::sync::{Mutex, PoisonError};

use revgeo_core::{LocationRecord, Slot};
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug)]
struct SlotCell {
    tx: watch::Sender<LocationRecord>,
    /// Highest sequence number accepted through `set_if_newer`.
    accepted_seq: Mutex<u64>,
}

impl SlotCell {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(LocationRecord::fallback());
        Self {
            tx,
            accepted_seq: Mutex::new(0),
        }
    }
}

/// All three slots read at one moment. Slots are written independently, so
/// a snapshot may pair an `origin` and `destination` from different
/// interactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSnapshot {
    pub current: LocationRecord,
    pub origin: LocationRecord,
    pub destination: LocationRecord,
}

/// Process-local location state shared by the controller and UI consumers.
#[derive(Debug)]
pub struct LocationStateStore {
    current: SlotCell,
    origin: SlotCell,
    destination: SlotCell,
}

impl Default for LocationStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationStateStore {
    /// Every slot starts out holding [`LocationRecord::fallback`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: SlotCell::new(),
            origin: SlotCell::new(),
            destination: SlotCell::new(),
        }
    }

    fn cell(&self, slot: Slot) -> &SlotCell {
        match slot {
            Slot::Current => &self.current,
            Slot::Origin => &self.origin,
            Slot::Destination => &self.destination,
        }
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> LocationRecord {
        self.cell(slot).tx.borrow().clone()
    }

    /// Unconditionally replaces the slot's record. Last write wins.
    pub fn set(&self, slot: Slot, record: LocationRecord) {
        tracing::info!(%slot, city = record.title(), "location slot updated");
        self.cell(slot).tx.send_replace(record);
    }

    /// Replaces the slot's record unless a write with a higher `seq` has
    /// already been accepted. Returns whether the record was stored.
    pub fn set_if_newer(&self, slot: Slot, seq: u64, record: LocationRecord) -> bool {
        let cell = self.cell(slot);
        let mut accepted = cell
            .accepted_seq
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if seq < *accepted {
            tracing::debug!(
                %slot,
                seq,
                accepted = *accepted,
                "discarding stale location update"
            );
            return false;
        }

        *accepted = seq;
        tracing::info!(%slot, seq, city = record.title(), "location slot updated");
        cell.tx.send_replace(record);
        true
    }

    /// Receiver for one slot. Each subscriber is notified independently;
    /// there is no ordering between subscribers.
    #[must_use]
    pub fn subscribe(&self, slot: Slot) -> watch::Receiver<LocationRecord> {
        self.cell(slot).tx.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            current: self.get(Slot::Current),
            origin: self.get(Slot::Origin),
            destination: self.get(Slot::Destination),
        }
    }
}
