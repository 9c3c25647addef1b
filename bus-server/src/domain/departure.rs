//! Timetable entries.

use serde::{Serialize, Serializer};
use std::fmt;

use super::time::{DepartureTime, TimeError};

/// One departure in a schedule list.
///
/// Timetables write an entry as `"HH:MM"`, optionally followed by a
/// space and an annotation such as `"(Sometimes)"`. The raw text is
/// kept so replies can quote the entry exactly as the timetable does.
///
/// # Examples
///
/// ```
/// use bus_server::domain::Departure;
///
/// let dep = Departure::parse("16:30 (Sometimes)").unwrap();
/// assert_eq!(dep.time().to_string(), "16:30");
/// assert_eq!(dep.annotation(), Some("(Sometimes)"));
/// assert_eq!(dep.to_string(), "16:30 (Sometimes)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    time: DepartureTime,
    text: String,
}

impl Departure {
    /// Parse a timetable entry.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let time_part = s.split_once(' ').map_or(s, |(time, _)| time);
        let time = DepartureTime::parse_hhmm(time_part)?;

        Ok(Self {
            time,
            text: s.to_string(),
        })
    }

    /// The scheduled time.
    pub fn time(&self) -> DepartureTime {
        self.time
    }

    /// The annotation after the time, if any.
    pub fn annotation(&self) -> Option<&str> {
        self.text
            .split_once(' ')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
    }

    /// The entry exactly as written in the timetable.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Departure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
