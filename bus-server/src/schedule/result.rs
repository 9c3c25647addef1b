//! Structured lookup results handed to the reply layer.
//!
//! Every outcome, including failures, is a variant of [`ScheduleResult`]
//! with a fixed set of fields. The JSON form carries a `status` tag and
//! is what the reply writer sees.

use serde::{Deserialize, Serialize};

use crate::domain::{Departure, DepartureTime, Route, ServiceType};

/// A query as produced by entity extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// Destination keyword, e.g. "farengipete"
    pub search_term: Option<String>,

    /// Time in HH:MM format
    pub target_time: Option<String>,
}

impl ScheduleQuery {
    pub fn new(search_term: impl Into<String>, target_time: impl Into<String>) -> Self {
        Self {
            search_term: Some(search_term.into()),
            target_time: Some(target_time.into()),
        }
    }
}

/// Route details carried through to the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// Route display name
    pub destination: String,

    pub service_type: ServiceType,

    /// Conductor's phone number
    pub contact: Option<String>,

    pub note: Option<String>,
}

impl From<&Route> for RouteInfo {
    fn from(route: &Route) -> Self {
        Self {
            destination: route.name.clone(),
            service_type: route.service_type,
            contact: route.contact.clone(),
            note: route.note.clone(),
        }
    }
}

/// Departures listed in a `found` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FoundBuses {
    Single {
        buses: Vec<Departure>,
    },
    DualStand {
        college_buses: Vec<Departure>,
        main_stand_buses: Vec<Departure>,
    },
}

/// Upcoming buses on a matched route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Found {
    pub search_term: String,
    pub target_time: DepartureTime,
    #[serde(flatten)]
    pub route: RouteInfo,
    #[serde(flatten)]
    pub buses: FoundBuses,
}

/// The route was matched but every bus has already left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooLate {
    pub search_term: String,
    pub target_time: DepartureTime,
    pub last_bus_time: DepartureTime,
    #[serde(flatten)]
    pub route: RouteInfo,
}

/// The route was matched but has no departures listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub search_term: String,
    pub target_time: DepartureTime,
    pub off_peak_message: Option<String>,
    #[serde(flatten)]
    pub route: RouteInfo,
}

/// Outcome of a schedule lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScheduleResult {
    Found(Found),
    NotFound(NotFound),
    TooLate(TooLate),

    /// No route has the search term as a keyword.
    NoRoute {
        search_term: String,
        target_time: DepartureTime,
        /// Names of every route in the timetable
        known_routes: Vec<String>,
    },

    /// The search term or target time is missing or malformed.
    NotUnderstood {
        search_term: Option<String>,
        target_time: Option<String>,
    },

    /// The timetable could not be loaded.
    Error { message: String },
}

impl ScheduleResult {
    /// The `status` tag as it appears in JSON.
    pub fn status(&self) -> &'static str {
        match self {
            ScheduleResult::Found(_) => "found",
            ScheduleResult::NotFound(_) => "not_found",
            ScheduleResult::TooLate(_) => "too_late",
            ScheduleResult::NoRoute { .. } => "no_route",
            ScheduleResult::NotUnderstood { .. } => "not_understood",
            ScheduleResult::Error { .. } => "error",
        }
    }
}
