//! Clock times for bus departures.
//!
//! Timetables and extracted queries both carry times as "HH:MM" strings
//! on a 24-hour clock. Bus timetables never cross midnight, so a bare
//! time of day is all we need.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Error returned when parsing an invalid time string.
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

/// A time of day on the 24-hour clock, at minute precision.
///
/// Ordering is chronological, which for zero-padded "HH:MM" strings is
/// the same as comparing the strings lexically.
///
/// # Examples
///
/// ```
/// use bus_server::domain::DepartureTime;
///
/// let time = DepartureTime::parse_hhmm("16:30").unwrap();
/// assert_eq!(time.to_string(), "16:30");
/// assert_eq!(time.to_12_hour(), "04:30 PM");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    /// Create a time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::domain::DepartureTime;
    ///
    /// assert!(DepartureTime::parse_hhmm("00:00").is_ok());
    /// assert!(DepartureTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(DepartureTime::parse_hhmm("1430").is_err());
    /// assert!(DepartureTime::parse_hhmm("9:00").is_err());
    /// assert!(DepartureTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Format on the 12-hour clock, e.g. "04:30 PM".
    pub fn to_12_hour(&self) -> String {
        self.0.format("%I:%M %p").to_string()
    }
}

impl From<NaiveTime> for DepartureTime {
    /// Truncates to minute precision.
    fn from(time: NaiveTime) -> Self {
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }
}

impl fmt::Debug for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepartureTime({self})")
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for DepartureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = DepartureTime::parse_hhmm("00:00").unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);

        let t = DepartureTime::parse_hhmm("23:59").unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = DepartureTime::parse_hhmm("08:05").unwrap();
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 5);
    }

    #[test]
    fn parse_invalid_format() {
        // Wrong length
        assert!(DepartureTime::parse_hhmm("1430").is_err());
        assert!(DepartureTime::parse_hhmm("14:3").is_err());
        assert!(DepartureTime::parse_hhmm("14:300").is_err());
        assert!(DepartureTime::parse_hhmm("").is_err());

        // Missing colon
        assert!(DepartureTime::parse_hhmm("14-30").is_err());

        // Non-digit characters
        assert!(DepartureTime::parse_hhmm("ab:cd").is_err());
        assert!(DepartureTime::parse_hhmm("1a:30").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(DepartureTime::parse_hhmm("24:00").is_err());
        assert!(DepartureTime::parse_hhmm("12:60").is_err());
    }

    #[test]
    fn error_display() {
        let err = DepartureTime::parse_hhmm("25:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: hour must be 0-23");
    }

    #[test]
    fn twelve_hour_format() {
        let t = |s| DepartureTime::parse_hhmm(s).unwrap().to_12_hour();

        assert_eq!(t("00:15"), "12:15 AM");
        assert_eq!(t("08:05"), "08:05 AM");
        assert_eq!(t("12:30"), "12:30 PM");
        assert_eq!(t("19:00"), "07:00 PM");
    }

    #[test]
    fn from_naive_time_truncates_seconds() {
        let time = NaiveTime::from_hms_opt(13, 7, 42).unwrap();
        assert_eq!(DepartureTime::from(time).to_string(), "13:07");
    }

    #[test]
    fn serializes_as_string() {
        let t = DepartureTime::parse_hhmm("09:00").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"09:00\"");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(time_str in valid_time()) {
            let parsed = DepartureTime::parse_hhmm(&time_str).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        /// Chronological order agrees with lexical order of the padded strings
        #[test]
        fn ordering_matches_lexical(a in valid_time(), b in valid_time()) {
            let ta = DepartureTime::parse_hhmm(&a).unwrap();
            let tb = DepartureTime::parse_hhmm(&b).unwrap();
            prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
        }
    }
}
