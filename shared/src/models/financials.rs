//! Financial Report Model

use serde::{Deserialize, Serialize};

/// Aggregated revenue report over completed appointments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialsReport {
    pub total_revenue_before_tax: f64,
    pub total_tax_collected: f64,
    pub total_revenue_after_tax: f64,
    pub total_appointments: i64,
    /// Human-readable description of the period the report covers
    pub filter_period: String,
}
