//! Client-side query types

use chrono::NaiveDate;

/// Period filter for financial reports
///
/// The backend accepts either a `date` or a `month` query parameter, never
/// both; with neither it defaults to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today in the shop's operating timezone (backend default)
    Today,
    /// A specific day
    Date(NaiveDate),
    /// A calendar month
    Month { year: i32, month: u32 },
}

impl ReportPeriod {
    /// Query parameter for this period, if any
    pub(crate) fn query_param(&self) -> Option<(&'static str, String)> {
        match self {
            ReportPeriod::Today => None,
            ReportPeriod::Date(date) => Some(("date", date.format("%Y-%m-%d").to_string())),
            ReportPeriod::Month { year, month } => {
                Some(("month", format!("{year:04}-{month:02}")))
            }
        }
    }
}
