//! Conversions between GPS time and UTC calendar time.
//!
//! E57 stamps acquisitions with GPS time: seconds since the GPS epoch, 1980-01-06T00:00:00 UTC.
//! GPS time does not observe leap seconds, so it runs ahead of UTC by the number of leap seconds
//! inserted since the epoch.
//!
//! ```
//! use e57_simple::gps_time;
//!
//! let gps = gps_time::gps_from_utc(2017, 1, 1, 0, 0, 0.).unwrap();
//! assert_eq!(1167264018., gps);
//! let utc = gps_time::utc_from_gps(gps).unwrap();
//! assert_eq!((2017, 1, 1), (utc.year, utc.month, utc.day));
//! ```

use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use std::time::SystemTime;

const SECONDS_PER_DAY: f64 = 86_400.;

/// `NaiveDate::num_days_from_ce` of 1980-01-06.
const GPS_EPOCH_DAYS_FROM_CE: i32 = 722_820;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

/// Days after the GPS epoch on which each leap second took effect.
///
/// The n-th entry (one-based) is the first day on which GPS-UTC is n seconds.
const LEAP_SECOND_DAYS: [i64; 18] = [
    542,   // 1981-07-01
    907,   // 1982-07-01
    1272,  // 1983-07-01
    2003,  // 1985-07-01
    2917,  // 1988-01-01
    3648,  // 1990-01-01
    4013,  // 1991-01-01
    4560,  // 1992-07-01
    4925,  // 1993-07-01
    5290,  // 1994-07-01
    5839,  // 1996-01-01
    6386,  // 1997-07-01
    6935,  // 1999-01-01
    9492,  // 2006-01-01
    10588, // 2009-01-01
    11865, // 2012-07-01
    12960, // 2015-07-01
    13510, // 2017-01-01
];

/// A UTC calendar time, broken into fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UtcDateTime {
    /// The year, 1900-9999.
    pub year: i32,
    /// The month, 1-12.
    pub month: u32,
    /// The day of the month, 1-31.
    pub day: u32,
    /// The hour, 0-23.
    pub hour: u32,
    /// The minute, 0-59.
    pub minute: u32,
    /// The seconds, 0.0 up to (but not including) 60.0.
    pub seconds: f64,
}

impl UtcDateTime {
    /// Converts this calendar time to GPS time.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::gps_time::UtcDateTime;
    /// let utc = UtcDateTime { year: 1980, month: 1, day: 6, ..Default::default() };
    /// assert_eq!(0., utc.to_gps().unwrap());
    /// ```
    pub fn to_gps(&self) -> Result<f64> {
        gps_from_utc(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.seconds,
        )
    }
}

/// Converts UTC calendar fields to GPS time, in seconds.
///
/// Fails with [Error::InvalidCalendarField] if any field is out of range. Dates before the GPS
/// epoch produce negative times.
///
/// # Examples
///
/// ```
/// use e57_simple::gps_time;
/// assert_eq!(0., gps_time::gps_from_utc(1980, 1, 6, 0, 0, 0.).unwrap());
/// assert!(gps_time::gps_from_utc(2010, 2, 30, 0, 0, 0.).is_err());
/// ```
pub fn gps_from_utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    seconds: f64,
) -> Result<f64> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(invalid("year", f64::from(year)));
    }
    if !(1..=12).contains(&month) {
        return Err(invalid("month", f64::from(month)));
    }
    if hour > 23 {
        return Err(invalid("hour", f64::from(hour)));
    }
    if minute > 59 {
        return Err(invalid("minute", f64::from(minute)));
    }
    if !(0.0..60.0).contains(&seconds) {
        return Err(invalid("seconds", seconds));
    }
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("day", f64::from(day)))?;
    let days = i64::from(date.num_days_from_ce() - GPS_EPOCH_DAYS_FROM_CE);
    let utc = days as f64 * SECONDS_PER_DAY + f64::from(hour * 3600 + minute * 60) + seconds;
    Ok(utc + leap_seconds_on_day(days))
}

/// Converts GPS time, in seconds, to UTC calendar fields.
///
/// Fails with [Error::OutOfRange] if the time is not finite or lands outside of the years
/// 1900-9999.
///
/// # Examples
///
/// ```
/// use e57_simple::gps_time;
/// let utc = gps_time::utc_from_gps(0.).unwrap();
/// assert_eq!((1980, 1, 6, 0, 0), (utc.year, utc.month, utc.day, utc.hour, utc.minute));
/// assert!(gps_time::utc_from_gps(f64::NAN).is_err());
/// ```
pub fn utc_from_gps(gps: f64) -> Result<UtcDateTime> {
    if !gps.is_finite() {
        return Err(out_of_range(gps));
    }
    let utc = gps - leap_seconds_at_gps(gps);
    let mut days = (utc / SECONDS_PER_DAY).floor();
    let mut seconds_of_day = utc - days * SECONDS_PER_DAY;
    if seconds_of_day < 0. {
        days -= 1.;
        seconds_of_day += SECONDS_PER_DAY;
    } else if seconds_of_day >= SECONDS_PER_DAY {
        days += 1.;
        seconds_of_day -= SECONDS_PER_DAY;
    }
    let days_from_ce = days + f64::from(GPS_EPOCH_DAYS_FROM_CE);
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&days_from_ce) {
        return Err(out_of_range(gps));
    }
    let date = NaiveDate::from_num_days_from_ce_opt(days_from_ce as i32)
        .ok_or_else(|| out_of_range(gps))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(out_of_range(gps));
    }
    let hour = (seconds_of_day / 3600.).floor();
    let minute = ((seconds_of_day - hour * 3600.) / 60.).floor();
    let seconds = seconds_of_day - hour * 3600. - minute * 60.;
    Ok(UtcDateTime {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: hour as u32,
        minute: minute as u32,
        seconds,
    })
}

/// Returns the current time as GPS time.
///
/// # Examples
///
/// ```
/// let now = e57_simple::gps_time::gps_now().unwrap();
/// assert!(now > 1e9);
/// ```
pub fn gps_now() -> Result<f64> {
    gps_from_system_time(SystemTime::now())
}

/// Converts a system time to GPS time.
pub fn gps_from_system_time(time: SystemTime) -> Result<f64> {
    let time = DateTime::<Utc>::from(time);
    let seconds = f64::from(time.second()) + f64::from(time.nanosecond()) / 1e9;
    gps_from_utc(
        time.year(),
        time.month(),
        time.day(),
        time.hour(),
        time.minute(),
        // Leap second representation in chrono goes past one billion nanoseconds.
        seconds.min(59.999_999_999),
    )
}

/// Converts GPS time to a system time.
pub fn system_time_from_gps(gps: f64) -> Result<SystemTime> {
    let utc = utc_from_gps(gps)?;
    let whole = utc.seconds.floor();
    let nanos = ((utc.seconds - whole) * 1e9).round().min(999_999_999.);
    let time = NaiveDate::from_ymd_opt(utc.year, utc.month, utc.day)
        .and_then(|date| date.and_hms_nano_opt(utc.hour, utc.minute, whole as u32, nanos as u32))
        .ok_or_else(|| out_of_range(gps))?;
    Ok(SystemTime::from(time.and_utc()))
}

fn leap_seconds_on_day(days: i64) -> f64 {
    let count = LEAP_SECOND_DAYS.iter().filter(|&&day| day <= days).count();
    count as f64
}

fn leap_seconds_at_gps(gps: f64) -> f64 {
    LEAP_SECOND_DAYS
        .iter()
        .enumerate()
        .rev()
        .map(|(i, &day)| (day, (i + 1) as f64))
        .find(|&(day, offset)| gps >= day as f64 * SECONDS_PER_DAY + offset)
        .map_or(0., |(_, offset)| offset)
}

fn invalid(field: &'static str, value: f64) -> Error {
    Error::InvalidCalendarField { field, value }
}

fn out_of_range(value: f64) -> Error {
    Error::OutOfRange {
        what: "gps time",
        value,
    }
}
