//! Domain types for the bus bot.
//!
//! This module contains the validated timetable model. All types enforce
//! their invariants at construction time, so code that receives these
//! types can trust their validity.

mod departure;
mod route;
mod service_type;
mod time;

pub use departure::Departure;
pub use route::{Period, Route, Schedule};
pub use service_type::ServiceType;
pub use time::{DepartureTime, TimeError};
