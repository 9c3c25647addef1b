//! Timetable loading errors.

use std::path::PathBuf;

use crate::domain::TimeError;

/// The timetable could not be read or is not a valid timetable.
///
/// Any of these means the deployment is broken rather than the query,
/// so callers report a generic "schedule unavailable" outcome.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File missing or unreadable
    #[error("failed to read timetable {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a JSON timetable document
    #[error("timetable JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A departure entry does not start with a valid HH:MM time
    #[error("route {route}: invalid departure {entry:?}: {source}")]
    InvalidDeparture {
        route: String,
        entry: String,
        #[source]
        source: TimeError,
    },

    /// A departure list goes backwards in time
    #[error("route {route}: {list} is out of order at {entry:?}")]
    Unsorted {
        route: String,
        list: &'static str,
        entry: String,
    },

    /// More than one schedule shape on the same route
    #[error("route {route}: has more than one of schedule, peak_schedule and stand schedules")]
    ConflictingSchedules { route: String },
}
