//! Shared types for the Chairside booking system
//!
//! Domain models and API payloads used by both the HTTP client and the
//! booking core. Raw provider documents live next to their clean
//! counterparts; the `$id` identity field never leaks past this crate.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
