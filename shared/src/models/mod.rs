//! Data models
//!
//! Shared between the HTTP client and the booking core.
//! Each entity has a clean type plus, where the backend returns provider
//! documents, a `Raw*Document` type carrying the provider's `$id` field.

pub mod appointment;
pub mod barber;
pub mod financials;
pub mod schedule;
pub mod service;
pub mod shop;

// Re-exports
pub use appointment::*;
pub use barber::*;
pub use financials::*;
pub use schedule::*;
pub use service::*;
pub use shop::*;
