//! Chairside Client - HTTP client for the booking backend
//!
//! Provides typed network calls to the barbershop backend API: public
//! catalog and availability queries, appointment creation, and the
//! manager/owner dashboard operations.

pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use types::ReportPeriod;
