//! Route service types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a route's buses run through the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// One fixed daily list of departures.
    Fixed,
    /// Frequency varies by time-of-day band (peak / off-peak).
    Variable,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Fixed => f.write_str("Fixed"),
            ServiceType::Variable => f.write_str("Variable"),
        }
    }
}
