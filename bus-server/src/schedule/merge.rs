//! Flattening a route's schedule into the lists the classifier filters.

use crate::domain::{Departure, Route, Schedule};

/// A route's departures for the day, normalised for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedSchedule<'a> {
    /// One chronological list.
    Single(Vec<&'a Departure>),

    /// One chronological list per stand, kept apart because replies
    /// must say which stop the buses leave from.
    DualStand {
        college: Vec<&'a Departure>,
        main: Vec<&'a Departure>,
    },
}

/// Merge a route's schedule.
///
/// Periods are concatenated in timetable order without re-sorting; the
/// loader has already checked that the concatenation is chronological.
pub fn merge(route: &Route) -> MergedSchedule<'_> {
    match &route.schedule {
        Schedule::Single(departures) => MergedSchedule::Single(departures.iter().collect()),
        Schedule::Periods(periods) => MergedSchedule::Single(
            periods
                .iter()
                .flat_map(|period| period.departures.iter())
                .collect(),
        ),
        Schedule::DualStand { college, main } => MergedSchedule::DualStand {
            college: college.iter().collect(),
            main: main.iter().collect(),
        },
    }
}
