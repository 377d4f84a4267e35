//! Shop operating timezone
//!
//! The whole system runs on a single operating timezone regardless of
//! which shop is selected, matching the backend's date arithmetic. If
//! shops ever span timezones this constant must move onto `Shop`; until
//! then the conversion below is load-bearing — the backend stores and
//! compares instants in UTC, and a mistake here shifts every appointment
//! by the zone offset.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Operating timezone for all shops
pub const SHOP_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTimeOfDay(String),

    #[error("local time {0} does not exist in {SHOP_TIMEZONE}")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Parse a shop-local "HH:MM" slot string
pub fn parse_slot(time: &str) -> Result<NaiveTime, TimeError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| TimeError::InvalidTimeOfDay(time.to_string()))
}

/// Interpret a local date and "HH:MM" time in the shop timezone and
/// convert to the absolute UTC instant
pub fn local_to_utc(date: NaiveDate, time: &str) -> Result<DateTime<Utc>, TimeError> {
    let local = date.and_time(parse_slot(time)?);
    match SHOP_TIMEZONE.from_local_datetime(&local) {
        LocalResult::Single(instant) => Ok(instant.with_timezone(&Utc)),
        // A DST fold repeats the wall-clock hour; take the earlier instant
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(TimeError::NonexistentLocalTime(local)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_slot_maps_to_utc_instant() {
        // 14:30 IST is 09:00 UTC (UTC+05:30, no DST)
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let instant = local_to_utc(date, "14:30").unwrap();
        assert_eq!(instant.to_rfc3339(), "2025-09-15T09:00:00+00:00");
    }

    #[test]
    fn malformed_slot_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        assert!(local_to_utc(date, "2:30 PM").is_err());
    }
}
