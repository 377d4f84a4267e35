//! Client-side booking selection state
//!
//! Pure state: no storage, no network. Persistence is mirrored by the
//! caller after each command (see [`crate::persistence`]), which keeps
//! this module testable without any storage dependency.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{Barber, Service, Shop};

/// The evolving destination of a booking
///
/// Fields are filled strictly left to right (shop before barber before
/// date before time); the wizard enforces that ordering and cascade-clears
/// later fields when an earlier one changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingTarget {
    pub shop: Option<Shop>,
    pub barber: Option<Barber>,
    pub date: Option<NaiveDate>,
    /// Shop-local time of day, "HH:MM"
    pub time: Option<String>,
}

impl BookingTarget {
    /// Whether all four fields are set
    pub fn is_complete(&self) -> bool {
        self.shop.is_some() && self.barber.is_some() && self.date.is_some() && self.time.is_some()
    }
}

/// Partial update for [`BookingTarget`]; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TargetPatch {
    pub shop: Option<Shop>,
    pub barber: Option<Barber>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

/// A target field, ordered by its position in the booking sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TargetField {
    Shop,
    Barber,
    Date,
    Time,
}

/// Totals derived from the current selection set
///
/// Recomputed on every read, never stored, so they cannot drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedTotals {
    pub total_price: f64,
    /// Minutes
    pub total_duration: i64,
}

/// Selected service line items plus the in-progress booking target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    services: Vec<Service>,
    target: BookingTarget,
}

impl SelectionStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted state
    pub fn from_parts(services: Vec<Service>, target: BookingTarget) -> Self {
        Self { services, target }
    }

    // ========== Commands ==========

    /// Toggle a service in the selection set
    ///
    /// Selecting an already-selected id removes it; otherwise the service
    /// is appended. Insertion order is kept but carries no meaning.
    pub fn toggle_service(&mut self, service: Service) {
        if let Some(pos) = self.services.iter().position(|s| s.id == service.id) {
            self.services.remove(pos);
        } else {
            self.services.push(service);
        }
    }

    /// Remove a service unconditionally; no-op if absent
    pub fn remove_service(&mut self, service_id: &str) {
        self.services.retain(|s| s.id != service_id);
    }

    /// Empty both the selection set and the booking target
    pub fn clear(&mut self) {
        self.services.clear();
        self.target = BookingTarget::default();
    }

    /// Shallow-merge fields into the booking target
    ///
    /// A dumb merge: the left-to-right invariant is the wizard's job, not
    /// the store's.
    pub fn merge_target(&mut self, patch: TargetPatch) {
        if let Some(shop) = patch.shop {
            self.target.shop = Some(shop);
        }
        if let Some(barber) = patch.barber {
            self.target.barber = Some(barber);
        }
        if let Some(date) = patch.date {
            self.target.date = Some(date);
        }
        if let Some(time) = patch.time {
            self.target.time = Some(time);
        }
    }

    /// Clear the given target field and every field after it
    ///
    /// Cascade-clear: changing the shop invalidates barber, date and time;
    /// changing the barber invalidates date and time; and so on.
    pub fn clear_target_from(&mut self, field: TargetField) {
        if field <= TargetField::Shop {
            self.target.shop = None;
        }
        if field <= TargetField::Barber {
            self.target.barber = None;
        }
        if field <= TargetField::Date {
            self.target.date = None;
        }
        self.target.time = None;
    }

    // ========== Reads ==========

    /// Current selection set, in insertion order
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Current booking target
    pub fn target(&self) -> &BookingTarget {
        &self.target
    }

    /// Whether no services are selected
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Sum price and duration over the current selection set
    pub fn totals(&self) -> DerivedTotals {
        DerivedTotals {
            total_price: self.services.iter().map(|s| s.price).sum(),
            total_duration: self.services.iter().map(|s| s.duration).sum(),
        }
    }
}
