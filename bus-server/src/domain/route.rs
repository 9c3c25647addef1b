//! Validated bus routes.

use super::departure::Departure;
use super::service_type::ServiceType;

/// A named period of a variable-frequency schedule (e.g. "morning_peak").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub name: String,
    pub departures: Vec<Departure>,
}

/// The departure lists of a route, in one of the three timetable shapes.
///
/// Every list is in non-decreasing chronological order; the timetable
/// loader rejects data that violates this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// One fixed daily list.
    Single(Vec<Departure>),

    /// Time-of-day bands, in the order the timetable lists them.
    Periods(Vec<Period>),

    /// Independent lists for the two physical stands the route serves.
    DualStand {
        college: Vec<Departure>,
        main: Vec<Departure>,
    },
}

/// One bus service and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Display label, e.g. "Mangalore".
    pub name: String,

    /// Lowercase match keywords.
    pub keywords: Vec<String>,

    pub service_type: ServiceType,

    /// Conductor's phone number.
    pub contact: Option<String>,

    pub note: Option<String>,

    /// What to tell riders when no bus is listed for the requested time.
    pub off_peak_message: Option<String>,

    pub schedule: Schedule,
}

impl Route {
    /// Whether `term` (already lowercased) is one of this route's keywords.
    pub fn has_keyword(&self, term: &str) -> bool {
        self.keywords.iter().any(|k| k == term)
    }
}
