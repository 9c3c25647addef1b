//! Timetable loading.
//!
//! The timetable is a JSON document listing routes. It is read fresh for
//! every query, parsed into DTOs, then converted into validated domain
//! routes.

mod convert;
mod error;
mod store;
mod types;

pub use convert::{convert_route, convert_timetable};
pub use error::LoadError;
pub use store::{JsonFileStore, TimetableStore, parse_timetable};
pub use types::{PeakSchedule, RouteRecord, TimetableFile};
