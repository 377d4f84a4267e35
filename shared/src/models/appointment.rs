//! Appointment Model
//!
//! Covers the submission payload (customer bookings and walk-ins) and the
//! manager-dashboard view of stored appointments. The backend stores the
//! per-appointment service list as a JSON string; decoding happens here so
//! the rest of the system only sees `Vec<ServiceSnapshot>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Appointment lifecycle status
///
/// Customer self-service bookings start as `Booked`; manager-initiated
/// walk-ins start as `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Booked,
    InProgress,
    Completed,
    Cancelled,
}

/// Service line item frozen at submission time
///
/// Independent of future catalog changes: name, price and duration are the
/// values the customer agreed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub id: String,
    pub name: String,
    pub duration: i64,
    pub price: f64,
}

/// Appointment creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_gender: Option<String>,
    pub shop_id: String,
    pub shop_name: String,
    pub barber_id: String,
    pub barber_name: String,
    /// Absolute UTC instant; the backend stores and compares in UTC
    pub start_time: DateTime<Utc>,
    pub service_snapshots: Vec<ServiceSnapshot>,
    /// Shop tax rate frozen at submission time (decimal fraction)
    pub tax_rate: f64,
    pub is_walk_in: bool,
    pub status: AppointmentStatus,
}

/// Status transition payload for PATCH
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
}

/// Raw provider document for a stored appointment
#[derive(Debug, Clone, Deserialize)]
pub struct RawAppointmentDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub shop_id: String,
    pub shop_name: String,
    pub barber_id: String,
    pub barber_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_gender: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    /// Revenue including tax
    #[serde(default)]
    pub total_amount: f64,
    /// Revenue before tax
    #[serde(default)]
    pub bill_amount: f64,
    #[serde(default)]
    pub tax_rate_snapshot: f64,
    #[serde(default)]
    pub payment_status: bool,
    #[serde(default)]
    pub is_walk_in: bool,
    /// JSON-encoded `Vec<ServiceSnapshot>`
    #[serde(default)]
    pub services_snapshot: String,
}

/// Decoding failure for a stored appointment document
#[derive(Debug, Error)]
pub enum AppointmentDecodeError {
    #[error("invalid services snapshot: {0}")]
    ServicesSnapshot(#[from] serde_json::Error),
}

/// Appointment as used by the manager dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub shop_id: String,
    pub shop_name: String,
    pub barber_id: String,
    pub barber_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_gender: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub total_amount: f64,
    pub bill_amount: f64,
    pub tax_rate_snapshot: f64,
    pub payment_status: bool,
    pub is_walk_in: bool,
    pub services: Vec<ServiceSnapshot>,
}

impl TryFrom<RawAppointmentDocument> for Appointment {
    type Error = AppointmentDecodeError;

    fn try_from(doc: RawAppointmentDocument) -> Result<Self, Self::Error> {
        // An absent snapshot field arrives as an empty string
        let services = if doc.services_snapshot.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&doc.services_snapshot)?
        };

        Ok(Self {
            id: doc.id,
            shop_id: doc.shop_id,
            shop_name: doc.shop_name,
            barber_id: doc.barber_id,
            barber_name: doc.barber_name,
            customer_name: doc.customer_name,
            customer_phone: doc.customer_phone,
            customer_gender: doc.customer_gender,
            start_time: doc.start_time,
            end_time: doc.end_time,
            status: doc.status,
            total_amount: doc.total_amount,
            bill_amount: doc.bill_amount,
            tax_rate_snapshot: doc.tax_rate_snapshot,
            payment_status: doc.payment_status,
            is_walk_in: doc.is_walk_in,
            services,
        })
    }
}
