//! Timetable file DTOs.
//!
//! These types map directly onto `timetable.json`. Schedule fields are all
//! optional here; which shape a route uses is decided during conversion.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::domain::ServiceType;

/// Top-level timetable document.
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableFile {
    pub routes: Vec<RouteRecord>,
}

/// A route as written in the timetable file.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRecord {
    /// Display label.
    pub name: String,

    /// Match keywords.
    pub keywords: Vec<String>,

    pub service_type: ServiceType,

    /// Conductor's phone number.
    pub contact: Option<String>,

    pub note: Option<String>,

    pub off_peak_message: Option<String>,

    /// Single daily list.
    pub schedule: Option<Vec<String>>,

    /// Period name → list, in file order.
    pub peak_schedule: Option<PeakSchedule>,

    /// Departures from the college stand.
    pub college_stand_schedule: Option<Vec<String>>,

    /// Departures from the main bus stand.
    pub main_stand_schedule: Option<Vec<String>>,
}

/// The `peak_schedule` mapping, keeping the order periods appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakSchedule(pub Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for PeakSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PeakScheduleVisitor;

        impl<'de> Visitor<'de> for PeakScheduleVisitor {
            type Value = PeakSchedule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of period name to departure list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut periods = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, times)) = map.next_entry::<String, Vec<String>>()? {
                    periods.push((name, times));
                }
                Ok(PeakSchedule(periods))
            }
        }

        deserializer.deserialize_map(PeakScheduleVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_fixed_route() {
        let json = r#"{
            "name": "Mangalore",
            "keywords": ["mangalore", "farengipete"],
            "service_type": "Fixed",
            "contact": "9876543210",
            "schedule": ["08:00", "12:30", "16:30 (Sometimes)", "19:00"]
        }"#;

        let route: RouteRecord = serde_json::from_str(json).unwrap();

        assert_eq!(route.name, "Mangalore");
        assert_eq!(route.keywords, vec!["mangalore", "farengipete"]);
        assert_eq!(route.service_type, ServiceType::Fixed);
        assert_eq!(route.contact.as_deref(), Some("9876543210"));
        assert!(route.note.is_none());
        assert_eq!(route.schedule.unwrap().len(), 4);
        assert!(route.peak_schedule.is_none());
    }

    #[test]
    fn peak_schedule_keeps_file_order() {
        // Alphabetical order would put "afternoon" first
        let json = r#"{
            "name": "BC Road",
            "keywords": ["bc road"],
            "service_type": "Variable",
            "peak_schedule": {
                "morning": ["07:30", "08:15"],
                "midday": ["11:00"],
                "afternoon": ["15:45"]
            }
        }"#;

        let route: RouteRecord = serde_json::from_str(json).unwrap();
        let names: Vec<_> = route
            .peak_schedule
            .unwrap()
            .0
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(names, vec!["morning", "midday", "afternoon"]);
    }

    #[test]
    fn deserialize_dual_stand_route() {
        let json = r#"{
            "name": "Moodbidri",
            "keywords": ["moodbidri"],
            "service_type": "Fixed",
            "college_stand_schedule": [],
            "main_stand_schedule": ["09:00"]
        }"#;

        let route: RouteRecord = serde_json::from_str(json).unwrap();

        assert_eq!(route.college_stand_schedule, Some(vec![]));
        assert_eq!(route.main_stand_schedule, Some(vec!["09:00".to_string()]));
    }

    #[test]
    fn unknown_service_type_is_rejected() {
        let json = r#"{"name": "X", "keywords": [], "service_type": "Express"}"#;
        assert!(serde_json::from_str::<RouteRecord>(json).is_err());
    }
}
