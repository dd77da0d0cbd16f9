//! Time-of-day handling for transit schedules.
//!
//! Schedule times are offsets from the start of a service day, not calendar
//! instants. GTFS allows hours past 23 (e.g. "25:10:00") for trips that keep
//! running after midnight; those values are preserved as-is and compare
//! greater than any wall-clock reading.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// Error returned when parsing or building an invalid time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

const MILLIS_PER_SECOND: u32 = 1_000;
const MILLIS_PER_MINUTE: u32 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u32 = 60 * MILLIS_PER_MINUTE;

/// A time of day relative to the start of a service day.
///
/// Stored as milliseconds since service-day midnight. There is no date
/// component, so two readings taken on different days at the same wall-clock
/// time are equal.
///
/// # Examples
///
/// ```
/// use transit_query::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse("8:05:00").unwrap();
/// assert_eq!(t.to_string(), "08:05:00");
///
/// // Past-midnight times keep their raw value
/// let late = TimeOfDay::parse("25:10:00").unwrap();
/// assert_eq!(late.hour(), 25);
/// assert!(late > TimeOfDay::parse("23:59:59").unwrap());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    millis: u32,
}

impl TimeOfDay {
    /// Start of the service day.
    pub const MIDNIGHT: Self = Self { millis: 0 };

    /// Build a time from hours, minutes and seconds.
    ///
    /// Hours may be 24 or more; minutes and seconds must be below 60.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        Self::from_hms_milli(hour, minute, second, 0)
    }

    /// Build a time from hours, minutes, seconds and milliseconds.
    pub fn from_hms_milli(
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self, TimeError> {
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
        if milli > 999 {
            return Err(TimeError::new("millisecond must be 0-999"));
        }

        let millis = hour
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|h| h.checked_add(minute * MILLIS_PER_MINUTE))
            .and_then(|t| t.checked_add(second * MILLIS_PER_SECOND + milli))
            .ok_or_else(|| TimeError::new("hour out of range"))?;

        Ok(Self { millis })
    }

    /// Build a time directly from milliseconds since service-day midnight.
    pub fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    /// Drop the date from a wall-clock time.
    ///
    /// Leap-second readings are clamped to the last millisecond of the second.
    pub fn from_naive(time: NaiveTime) -> Self {
        let milli = (time.nanosecond() / 1_000_000).min(999);
        Self {
            millis: time.hour() * MILLIS_PER_HOUR
                + time.minute() * MILLIS_PER_MINUTE
                + time.second() * MILLIS_PER_SECOND
                + milli,
        }
    }

    /// The current local wall-clock time with the date removed.
    pub fn now() -> Self {
        Self::from_naive(chrono::Local::now().time())
    }

    /// Parse a GTFS-style `H:MM:SS` or `HH:MM:SS` time.
    ///
    /// Surrounding whitespace is ignored. Hours are not limited to 0-23.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_query::domain::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse("08:00:00").is_ok());
    /// assert!(TimeOfDay::parse(" 8:00:00").is_ok());
    /// assert!(TimeOfDay::parse("24:30:00").is_ok());
    ///
    /// assert!(TimeOfDay::parse("08:00").is_err());
    /// assert!(TimeOfDay::parse("08:60:00").is_err());
    /// assert!(TimeOfDay::parse("8:0:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected H:MM:SS format"));
        };

        if h.is_empty() || h.len() > 3 {
            return Err(TimeError::new("expected 1-3 hour digits"));
        }
        let hour = parse_digits(h).ok_or_else(|| TimeError::new("invalid hour digits"))?;

        if m.len() != 2 {
            return Err(TimeError::new("expected 2 minute digits"));
        }
        let minute = parse_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?;

        if sec.len() != 2 {
            return Err(TimeError::new("expected 2 second digits"));
        }
        let second = parse_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?;

        Self::from_hms(hour, minute, second)
    }

    /// Returns the hour, which may exceed 23.
    pub fn hour(&self) -> u32 {
        self.millis / MILLIS_PER_HOUR
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        (self.millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND
    }

    /// Returns the millisecond (0-999).
    pub fn millisecond(&self) -> u32 {
        self.millis % MILLIS_PER_SECOND
    }

    /// Milliseconds since service-day midnight.
    pub fn as_millis(&self) -> u32 {
        self.millis
    }

    /// True for times at or beyond 24:00:00 of the service day.
    pub fn is_past_midnight(&self) -> bool {
        self.millis >= 24 * MILLIS_PER_HOUR
    }

    /// Add a duration, returning `None` if the result would be negative or
    /// overflow.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let millis = i64::from(self.millis).checked_add(duration.num_milliseconds())?;
        u32::try_from(millis).ok().map(Self::from_millis)
    }

    /// Subtract a duration, returning `None` if the result would be negative.
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        self.checked_add(-duration)
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        Duration::milliseconds(i64::from(self.millis) - i64::from(other.millis))
    }
}

impl Sub for TimeOfDay {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        self.signed_duration_since(rhs)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self::from_naive(time)
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({self})")
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )?;
        if self.millisecond() != 0 {
            write!(f, ".{:03}", self.millisecond())?;
        }
        Ok(())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let time = t("00:00:00");
        assert_eq!(time, TimeOfDay::MIDNIGHT);

        let time = t("8:15:30");
        assert_eq!(time.hour(), 8);
        assert_eq!(time.minute(), 15);
        assert_eq!(time.second(), 30);

        let time = t("23:59:59");
        assert_eq!(time.hour(), 23);
        assert_eq!(time.minute(), 59);
        assert_eq!(time.second(), 59);
    }

    #[test]
    fn parse_keeps_hours_past_midnight() {
        let time = t("25:10:00");
        assert_eq!(time.hour(), 25);
        assert_eq!(time.minute(), 10);
        assert!(time.is_past_midnight());
        assert!(!t("23:59:59").is_past_midnight());
        assert!(t("24:00:00").is_past_midnight());
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(t(" 7:00:00 "), t("07:00:00"));
    }

    #[test]
    fn parse_invalid_format() {
        assert!(TimeOfDay::parse("").is_err());
        assert!(TimeOfDay::parse("08:00").is_err());
        assert!(TimeOfDay::parse("08:00:00:00").is_err());
        assert!(TimeOfDay::parse(":00:00").is_err());
        assert!(TimeOfDay::parse("1000:00:00").is_err());
        assert!(TimeOfDay::parse("08:0:00").is_err());
        assert!(TimeOfDay::parse("08:00:0").is_err());
        assert!(TimeOfDay::parse("ab:cd:ef").is_err());
        assert!(TimeOfDay::parse("+8:00:00").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(TimeOfDay::parse("08:60:00").is_err());
        assert!(TimeOfDay::parse("08:00:60").is_err());
    }

    #[test]
    fn from_naive_drops_date() {
        let naive = NaiveTime::from_hms_milli_opt(14, 30, 5, 250).unwrap();
        let time = TimeOfDay::from_naive(naive);
        assert_eq!(time.hour(), 14);
        assert_eq!(time.minute(), 30);
        assert_eq!(time.second(), 5);
        assert_eq!(time.millisecond(), 250);
    }

    #[test]
    fn display_format() {
        assert_eq!(t("8:05:00").to_string(), "08:05:00");
        assert_eq!(t("26:00:01").to_string(), "26:00:01");
        assert_eq!(
            TimeOfDay::from_hms_milli(9, 0, 0, 7).unwrap().to_string(),
            "09:00:00.007"
        );
        assert_eq!(format!("{:?}", t("10:00:00")), "TimeOfDay(10:00:00)");
    }

    #[test]
    fn ordering() {
        assert!(t("08:00:00") < t("08:00:01"));
        assert!(t("23:59:59") < t("24:00:00"));
        assert!(t("10:00:00") > t("9:59:59"));
    }

    #[test]
    fn subtraction() {
        assert_eq!(t("08:30:00") - t("08:00:00"), Duration::minutes(30));
        assert_eq!(t("08:00:00") - t("08:30:00"), -Duration::minutes(30));
        assert_eq!(t("25:00:00") - t("23:00:00"), Duration::hours(2));
    }

    #[test]
    fn checked_arithmetic() {
        let time = t("23:30:00");
        assert_eq!(time.checked_add(Duration::hours(1)), Some(t("24:30:00")));
        assert_eq!(time.checked_sub(Duration::minutes(30)), Some(t("23:00:00")));
        assert_eq!(TimeOfDay::MIDNIGHT.checked_sub(Duration::seconds(1)), None);
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&t("7:45:00")).unwrap();
        assert_eq!(json, r#""07:45:00""#);

        let back: TimeOfDay = serde_json::from_str(r#""25:01:02""#).unwrap();
        assert_eq!(back, t("25:01:02"));

        assert!(serde_json::from_str::<TimeOfDay>(r#""noon""#).is_err());
    }
}
