//! Booking selection and wizard flow
//!
//! The client-side core of the booking experience: a pure selection store
//! with derived totals, a durable cart mirror, degrading availability
//! queries, debounced refresh scheduling, payload assembly and submission,
//! and the step-by-step wizard state machine that ties them together.

pub mod availability;
pub mod debounce;
pub mod persistence;
pub mod selection;
pub mod submit;
pub mod time;
pub mod wizard;

pub use availability::{AvailabilityAdapter, AvailabilityApi};
pub use debounce::{Debouncer, SETTLE_DELAY};
pub use persistence::{CartSnapshot, CartStorage, FileCartStorage, MemoryCartStorage};
pub use selection::{BookingTarget, DerivedTotals, SelectionStore, TargetField, TargetPatch};
pub use submit::{AppointmentApi, CustomerDetails, SubmissionGateway, SubmitError};
pub use wizard::{BookingFlow, BookingFlowError, WizardError, WizardState};
