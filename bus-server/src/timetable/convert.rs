//! Conversion from timetable DTOs to domain types.
//!
//! Every departure string is parsed and every list is checked for
//! chronological order here, so the schedule engine can rely on both.

use crate::domain::{Departure, Period, Route, Schedule};

use super::error::LoadError;
use super::types::{RouteRecord, TimetableFile};

/// Convert a whole timetable document, keeping route order.
pub fn convert_timetable(file: TimetableFile) -> Result<Vec<Route>, LoadError> {
    file.routes.into_iter().map(convert_route).collect()
}

/// Convert a single route record.
pub fn convert_route(record: RouteRecord) -> Result<Route, LoadError> {
    let name = record.name;
    let has_stands =
        record.college_stand_schedule.is_some() || record.main_stand_schedule.is_some();

    let shapes = [
        record.schedule.is_some(),
        record.peak_schedule.is_some(),
        has_stands,
    ];
    if shapes.iter().filter(|present| **present).count() > 1 {
        return Err(LoadError::ConflictingSchedules { route: name });
    }

    let schedule = if has_stands {
        let college = parse_list(&name, "college_stand_schedule", record.college_stand_schedule)?;
        let main = parse_list(&name, "main_stand_schedule", record.main_stand_schedule)?;
        Schedule::DualStand { college, main }
    } else if let Some(peak) = record.peak_schedule {
        let mut periods = Vec::with_capacity(peak.0.len());
        for (period, times) in peak.0 {
            let departures = parse_list(&name, "peak_schedule", Some(times))?;
            periods.push(Period {
                name: period,
                departures,
            });
        }
        // Periods are concatenated as-is, so the join must also be in order
        check_sorted(
            &name,
            "peak_schedule",
            periods.iter().flat_map(|p| p.departures.iter()),
        )?;
        Schedule::Periods(periods)
    } else {
        Schedule::Single(parse_list(&name, "schedule", record.schedule)?)
    };

    Ok(Route {
        keywords: record
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .collect(),
        name,
        service_type: record.service_type,
        contact: record.contact,
        note: record.note,
        off_peak_message: record.off_peak_message,
        schedule,
    })
}

/// Parse one departure list; an absent list is empty.
fn parse_list(
    route: &str,
    list: &'static str,
    times: Option<Vec<String>>,
) -> Result<Vec<Departure>, LoadError> {
    let departures = times
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            Departure::parse(&entry).map_err(|source| LoadError::InvalidDeparture {
                route: route.to_string(),
                entry,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_sorted(route, list, departures.iter())?;

    Ok(departures)
}

/// Reject a sequence whose times ever go backwards.
fn check_sorted<'a>(
    route: &str,
    list: &'static str,
    departures: impl Iterator<Item = &'a Departure>,
) -> Result<(), LoadError> {
    let mut prev = None;
    for dep in departures {
        if prev.is_some_and(|p| dep.time() < p) {
            return Err(LoadError::Unsorted {
                route: route.to_string(),
                list,
                entry: dep.to_string(),
            });
        }
        prev = Some(dep.time());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceType;
    use crate::timetable::types::PeakSchedule;

    fn record(name: &str) -> RouteRecord {
        RouteRecord {
            name: name.to_string(),
            keywords: vec!["Mangalore".to_string(), " farengipete ".to_string()],
            service_type: ServiceType::Fixed,
            contact: None,
            note: None,
            off_peak_message: None,
            schedule: None,
            peak_schedule: None,
            college_stand_schedule: None,
            main_stand_schedule: None,
        }
    }

    fn strings(times: &[&str]) -> Vec<String> {
        times.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn converts_single_schedule() {
        let mut rec = record("Mangalore");
        rec.schedule = Some(strings(&["08:00", "16:30 (Sometimes)"]));

        let route = convert_route(rec).unwrap();

        assert_eq!(route.keywords, vec!["mangalore", "farengipete"]);
        match route.schedule {
            Schedule::Single(deps) => {
                assert_eq!(deps.len(), 2);
                assert_eq!(deps[1].as_str(), "16:30 (Sometimes)");
            }
            other => panic!("Expected single schedule, got {other:?}"),
        }
    }

    #[test]
    fn missing_schedule_is_empty_single_list() {
        let route = convert_route(record("Empty")).unwrap();
        assert_eq!(route.schedule, Schedule::Single(vec![]));
    }

    #[test]
    fn converts_periods_in_order() {
        let mut rec = record("BC Road");
        rec.service_type = ServiceType::Variable;
        rec.peak_schedule = Some(PeakSchedule(vec![
            ("morning".to_string(), strings(&["07:30", "08:15"])),
            ("evening".to_string(), strings(&["17:00"])),
        ]));

        let route = convert_route(rec).unwrap();

        match route.schedule {
            Schedule::Periods(periods) => {
                assert_eq!(periods.len(), 2);
                assert_eq!(periods[0].name, "morning");
                assert_eq!(periods[1].departures[0].as_str(), "17:00");
            }
            other => panic!("Expected periods, got {other:?}"),
        }
    }

    #[test]
    fn periods_out_of_order_across_bands_are_rejected() {
        let mut rec = record("BC Road");
        rec.peak_schedule = Some(PeakSchedule(vec![
            ("evening".to_string(), strings(&["17:00"])),
            ("morning".to_string(), strings(&["07:30"])),
        ]));

        let err = convert_route(rec).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Unsorted { list: "peak_schedule", ref entry, .. } if entry == "07:30"
        ));
    }

    #[test]
    fn dual_stand_with_one_list_missing() {
        let mut rec = record("Moodbidri");
        rec.main_stand_schedule = Some(strings(&["09:00"]));

        let route = convert_route(rec).unwrap();

        match route.schedule {
            Schedule::DualStand { college, main } => {
                assert!(college.is_empty());
                assert_eq!(main.len(), 1);
            }
            other => panic!("Expected dual stand, got {other:?}"),
        }
    }

    #[test]
    fn unsorted_list_is_rejected() {
        let mut rec = record("Mangalore");
        rec.schedule = Some(strings(&["12:30", "08:00"]));

        let err = convert_route(rec).unwrap_err();
        assert!(matches!(err, LoadError::Unsorted { list: "schedule", .. }));
    }

    #[test]
    fn equal_times_are_allowed() {
        let mut rec = record("Mangalore");
        rec.schedule = Some(strings(&["08:00", "08:00 (Sometimes)"]));
        assert!(convert_route(rec).is_ok());
    }

    #[test]
    fn invalid_entry_is_rejected() {
        let mut rec = record("Mangalore");
        rec.schedule = Some(strings(&["8 o'clock"]));

        let err = convert_route(rec).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDeparture { ref entry, .. } if entry == "8 o'clock"));
    }

    #[test]
    fn conflicting_shapes_are_rejected() {
        let mut rec = record("Mangalore");
        rec.schedule = Some(strings(&["08:00"]));
        rec.main_stand_schedule = Some(strings(&["09:00"]));

        assert!(matches!(
            convert_route(rec),
            Err(LoadError::ConflictingSchedules { .. })
        ));
    }
}
