//! Schedule query engine.
//!
//! Answers "when is the next bus to X after time T?" from the timetable:
//!
//! 1. load the routes (fresh for every query)
//! 2. match the search term against route keywords
//! 3. merge the route's schedule into one list, or one per stand
//! 4. filter departures at or after the target time and classify
//!
//! Every outcome is returned as a [`ScheduleResult`]; nothing here panics
//! or returns an error to the caller. The engine holds no state, so it can
//! run concurrently for any number of messages.

mod classify;
mod matcher;
mod merge;
mod result;

pub use classify::{Classification, classify};
pub use matcher::match_route;
pub use merge::{MergedSchedule, merge};
pub use result::{Found, FoundBuses, NotFound, RouteInfo, ScheduleQuery, ScheduleResult, TooLate};

use tracing::{debug, error};

use crate::domain::{DepartureTime, Route};
use crate::timetable::TimetableStore;

/// Message placed in `error` results; the underlying cause is logged.
const UNAVAILABLE: &str = "schedule unavailable";

/// Run a query against a freshly loaded timetable.
///
/// A load failure becomes [`ScheduleResult::Error`].
pub fn lookup<S>(store: &S, query: &ScheduleQuery) -> ScheduleResult
where
    S: TimetableStore + ?Sized,
{
    match store.load() {
        Ok(routes) => lookup_in(&routes, query),
        Err(e) => {
            error!(error = %e, "failed to load timetable");
            ScheduleResult::Error {
                message: UNAVAILABLE.to_string(),
            }
        }
    }
}

/// Run a query against already loaded routes.
pub fn lookup_in(routes: &[Route], query: &ScheduleQuery) -> ScheduleResult {
    let not_understood = || ScheduleResult::NotUnderstood {
        search_term: query.search_term.clone(),
        target_time: query.target_time.clone(),
    };

    let Some(search_term) = query
        .search_term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return not_understood();
    };

    let Some(target_time) = query
        .target_time
        .as_deref()
        .and_then(|t| DepartureTime::parse_hhmm(t.trim()).ok())
    else {
        return not_understood();
    };

    let Some(route) = match_route(routes, search_term) else {
        debug!(search_term, "no route for search term");
        return ScheduleResult::NoRoute {
            search_term: search_term.to_string(),
            target_time,
            known_routes: routes.iter().map(|r| r.name.clone()).collect(),
        };
    };

    let search_term = search_term.to_string();
    let info = RouteInfo::from(route);

    let result = match classify(&merge(route), target_time) {
        Classification::Found(buses) => ScheduleResult::Found(Found {
            search_term,
            target_time,
            route: info,
            buses: FoundBuses::Single { buses },
        }),
        Classification::FoundAtStands { college, main } => ScheduleResult::Found(Found {
            search_term,
            target_time,
            route: info,
            buses: FoundBuses::DualStand {
                college_buses: college,
                main_stand_buses: main,
            },
        }),
        Classification::TooLate { last_bus_time } => ScheduleResult::TooLate(TooLate {
            search_term,
            target_time,
            last_bus_time,
            route: info,
        }),
        Classification::NotFound => ScheduleResult::NotFound(NotFound {
            search_term,
            target_time,
            off_peak_message: route.off_peak_message.clone(),
            route: info,
        }),
    };

    debug!(route = %route.name, status = result.status(), "classified query");
    result
}
