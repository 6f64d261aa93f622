use crate::{
    Result,
    gps_time::{self, UtcDateTime},
};
use serde::{Deserialize, Serialize};

/// A point in time, as stored in E57 headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTime {
    /// Seconds since the GPS epoch.
    pub date_time_value: f64,
    /// True if the time came from an atomic clock, e.g. a GPS receiver.
    pub is_atomic_clock_referenced: bool,
}

impl DateTime {
    /// Creates a date time from GPS time.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::DateTime;
    /// let date_time = DateTime::from_gps(42.);
    /// assert!(!date_time.is_atomic_clock_referenced);
    /// ```
    pub fn from_gps(gps: f64) -> DateTime {
        DateTime {
            date_time_value: gps,
            is_atomic_clock_referenced: false,
        }
    }

    /// Creates a date time from UTC calendar fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::DateTime;
    /// let date_time = DateTime::from_utc(1980, 1, 6, 0, 0, 1.).unwrap();
    /// assert_eq!(1., date_time.date_time_value);
    /// ```
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        seconds: f64,
    ) -> Result<DateTime> {
        gps_time::gps_from_utc(year, month, day, hour, minute, seconds).map(DateTime::from_gps)
    }

    /// Returns the current time, as read from the system clock.
    pub fn now() -> Result<DateTime> {
        gps_time::gps_now().map(DateTime::from_gps)
    }

    /// Converts this date time to UTC calendar fields.
    pub fn to_utc(&self) -> Result<UtcDateTime> {
        gps_time::utc_from_gps(self.date_time_value)
    }
}
