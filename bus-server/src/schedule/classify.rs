//! Time filtering and outcome classification.

use crate::domain::{Departure, DepartureTime};

use super::merge::MergedSchedule;

/// Outcome of filtering a merged schedule against a target time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Departures at or after the target time, in timetable order.
    Found(Vec<Departure>),

    /// Per-stand departures at or after the target time. Either list may
    /// be empty; a dual-stand route is never "too late".
    FoundAtStands {
        college: Vec<Departure>,
        main: Vec<Departure>,
    },

    /// Every departure is before the target time.
    TooLate { last_bus_time: DepartureTime },

    /// No departure data for the day.
    NotFound,
}

/// Classify a merged schedule against `target`.
///
/// The comparison is inclusive: a bus leaving exactly at `target` counts.
pub fn classify(merged: &MergedSchedule<'_>, target: DepartureTime) -> Classification {
    match merged {
        MergedSchedule::Single(departures) => classify_single(departures, target),
        MergedSchedule::DualStand { college, main } => Classification::FoundAtStands {
            college: at_or_after(college, target),
            main: at_or_after(main, target),
        },
    }
}

fn classify_single(departures: &[&Departure], target: DepartureTime) -> Classification {
    let Some(last) = departures.last() else {
        return Classification::NotFound;
    };
    let last_bus_time = last.time();

    let upcoming = at_or_after(departures, target);
    if !upcoming.is_empty() {
        Classification::Found(upcoming)
    } else if target > last_bus_time {
        Classification::TooLate { last_bus_time }
    } else {
        // Unreachable for a chronological list: the last bus would have matched
        Classification::NotFound
    }
}

fn at_or_after(departures: &[&Departure], target: DepartureTime) -> Vec<Departure> {
    departures
        .iter()
        .filter(|dep| dep.time() >= target)
        .map(|dep| (*dep).clone())
        .collect()
}
