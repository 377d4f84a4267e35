//! Appointment submission
//!
//! Assembles the final payload from the selection set, the booking target
//! and the customer details, converts the shop-local slot into a UTC
//! instant, and maps the backend's verdict to a terminal outcome. All
//! preconditions are checked locally; a violated precondition never
//! reaches the network.

use crate::selection::BookingTarget;
use crate::time::{self, TimeError};
use async_trait::async_trait;
use chairside_client::{ClientError, ClientResult, HttpClient};
use chrono::Utc;
use shared::models::{
    AppointmentCreate, AppointmentStatus, Barber, Service, ServiceSnapshot, Shop,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Fallback message when the backend rejects a booking without detail
pub const GENERIC_BOOKING_ERROR: &str = "An error occurred during booking.";

/// Appointment creation endpoint, as a seam for tests
#[async_trait]
pub trait AppointmentApi: Send + Sync {
    async fn submit_appointment(&self, payload: &AppointmentCreate) -> ClientResult<()>;
}

#[async_trait]
impl AppointmentApi for HttpClient {
    async fn submit_appointment(&self, payload: &AppointmentCreate) -> ClientResult<()> {
        self.create_appointment(payload).await.map(|_| ())
    }
}

/// Customer identity entered on the final wizard step
#[derive(Debug, Clone, Default)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub gender: Option<String>,
}

impl CustomerDetails {
    /// Minimum-length checks; gender is optional
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.name.trim().len() < 2 {
            return Err(SubmitError::InvalidCustomer(
                "Name must be at least 2 characters.".to_string(),
            ));
        }
        if self.phone.trim().len() < 10 {
            return Err(SubmitError::InvalidCustomer(
                "Please enter a valid phone number.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// No services selected
    #[error("no services selected")]
    NoServices,

    /// A booking target field is still unset
    #[error("booking target incomplete: missing {0}")]
    IncompleteTarget(&'static str),

    /// Customer details failed the local checks
    #[error("{0}")]
    InvalidCustomer(String),

    /// The local slot could not be converted to a UTC instant
    #[error("invalid start time: {0}")]
    InvalidStartTime(#[from] TimeError),

    /// The backend rejected the booking with a detail message
    #[error("{0}")]
    Rejected(String),

    /// Transport-level failure without a structured backend message
    #[error("{GENERIC_BOOKING_ERROR}")]
    Transport(#[source] ClientError),
}

impl SubmitError {
    /// Whether this failure happened before any network call
    pub fn is_local(&self) -> bool {
        !matches!(self, SubmitError::Rejected(_) | SubmitError::Transport(_))
    }

    /// Message to show the user: the backend's detail verbatim when it
    /// sent one, the generic message otherwise
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ClientError> for SubmitError {
    fn from(e: ClientError) -> Self {
        match e.detail() {
            Some(detail) => SubmitError::Rejected(detail.to_string()),
            None => SubmitError::Transport(e),
        }
    }
}

/// Assembles and submits appointment payloads
pub struct SubmissionGateway<A> {
    api: Arc<A>,
}

impl<A: AppointmentApi> SubmissionGateway<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Submit a customer self-service booking
    ///
    /// Requires a complete target; the local date and slot are interpreted
    /// in the shop operating timezone. The created appointment starts as
    /// `Booked`.
    pub async fn submit_booking(
        &self,
        services: &[Service],
        target: &BookingTarget,
        customer: &CustomerDetails,
    ) -> Result<(), SubmitError> {
        if services.is_empty() {
            return Err(SubmitError::NoServices);
        }
        let shop = target
            .shop
            .as_ref()
            .ok_or(SubmitError::IncompleteTarget("shop"))?;
        let barber = target
            .barber
            .as_ref()
            .ok_or(SubmitError::IncompleteTarget("barber"))?;
        let date = target.date.ok_or(SubmitError::IncompleteTarget("date"))?;
        let slot = target
            .time
            .as_deref()
            .ok_or(SubmitError::IncompleteTarget("time"))?;
        customer.validate()?;

        let start_time = time::local_to_utc(date, slot)?;
        let payload = build_payload(
            services,
            shop,
            barber,
            customer,
            start_time,
            false,
            AppointmentStatus::Booked,
        );

        debug!(shop = %shop.id, barber = %barber.id, %start_time, "submitting booking");
        self.api.submit_appointment(&payload).await?;
        Ok(())
    }

    /// Submit a manager-initiated walk-in
    ///
    /// Starts right now and begins life as `InProgress`.
    pub async fn submit_walk_in(
        &self,
        services: &[Service],
        shop: &Shop,
        barber: &Barber,
        customer: &CustomerDetails,
    ) -> Result<(), SubmitError> {
        if services.is_empty() {
            return Err(SubmitError::NoServices);
        }
        customer.validate()?;

        let payload = build_payload(
            services,
            shop,
            barber,
            customer,
            Utc::now(),
            true,
            AppointmentStatus::InProgress,
        );

        debug!(shop = %shop.id, barber = %barber.id, "submitting walk-in");
        self.api.submit_appointment(&payload).await?;
        Ok(())
    }
}

/// Freeze the selection into the submission payload
fn build_payload(
    services: &[Service],
    shop: &Shop,
    barber: &Barber,
    customer: &CustomerDetails,
    start_time: chrono::DateTime<Utc>,
    is_walk_in: bool,
    status: AppointmentStatus,
) -> AppointmentCreate {
    let service_snapshots = services
        .iter()
        .map(|s| ServiceSnapshot {
            id: s.id.clone(),
            name: s.name.clone(),
            duration: s.duration,
            price: s.price,
        })
        .collect();

    AppointmentCreate {
        customer_name: customer.name.trim().to_string(),
        customer_phone: customer.phone.trim().to_string(),
        customer_gender: customer.gender.clone().filter(|g| !g.is_empty()),
        shop_id: shop.id.clone(),
        shop_name: shop.name.clone(),
        barber_id: barber.id.clone(),
        barber_name: barber.name.clone(),
        start_time,
        service_snapshots,
        tax_rate: shop.tax_rate,
        is_walk_in,
        status,
    }
}
