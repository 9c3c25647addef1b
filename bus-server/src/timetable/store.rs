//! Timetable sources.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::Route;

use super::convert::convert_timetable;
use super::error::LoadError;
use super::types::TimetableFile;

/// Source of route definitions.
///
/// `load` is called once per query and must return the routes in source
/// order. Implementations do no writes, so concurrent calls need no
/// coordination.
pub trait TimetableStore {
    fn load(&self) -> Result<Vec<Route>, LoadError>;
}

/// Reads a JSON timetable file from disk on every `load`.
///
/// There is no caching: edits to the file are visible to the next query.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TimetableStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Route>, LoadError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            path: self.path.clone(),
            source,
        })?;

        let routes = parse_timetable(&json)?;
        debug!(path = %self.path.display(), routes = routes.len(), "loaded timetable");
        Ok(routes)
    }
}

/// Parse and validate a timetable document.
pub fn parse_timetable(json: &str) -> Result<Vec<Route>, LoadError> {
    let file: TimetableFile = serde_json::from_str(json)?;
    convert_timetable(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TIMETABLE: &str = r#"{
        "routes": [
            {
                "name": "Mangalore",
                "keywords": ["mangalore", "farengipete"],
                "service_type": "Fixed",
                "schedule": ["08:00", "12:30", "16:30 (Sometimes)", "19:00"]
            },
            {
                "name": "BC Road",
                "keywords": ["bc road", "bcroad"],
                "service_type": "Variable",
                "peak_schedule": {"morning": ["07:30"], "evening": ["17:15"]}
            }
        ]
    }"#;

    #[test]
    fn loads_routes_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TIMETABLE.as_bytes()).unwrap();

        let store = JsonFileStore::new(file.path());
        let routes = store.load().unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].name, "Mangalore");
        assert_eq!(routes[1].name, "BC Road");
    }

    #[test]
    fn reads_fresh_on_every_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.json");
        std::fs::write(&path, TIMETABLE).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load().unwrap().len(), 2);

        std::fs::write(&path, r#"{"routes": []}"#).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));

        assert!(matches!(store.load(), Err(LoadError::Read { .. })));
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            parse_timetable("{\"routes\": [}"),
            Err(LoadError::Json(_))
        ));
        // Structurally wrong: routes must be a list
        assert!(matches!(
            parse_timetable(r#"{"routes": {}}"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn ships_a_valid_sample_timetable() {
        let store = JsonFileStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/timetable.json"));
        let routes = store.load().unwrap();
        assert!(!routes.is_empty());
    }
}
