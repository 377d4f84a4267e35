//! Barber Schedule Model

use serde::{Deserialize, Serialize};

/// One weekday entry of a barber's working schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// Weekday name, e.g. "Monday"
    pub day_of_week: String,
    /// Shift start, "HH:MM"
    pub start_time: String,
    /// Shift end, "HH:MM"
    pub end_time: String,
    pub is_day_off: bool,
}

/// Full weekly schedule, as both the GET response and the POST payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarberSchedule {
    pub schedules: Vec<ScheduleDay>,
}
