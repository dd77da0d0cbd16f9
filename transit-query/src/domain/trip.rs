//! Trips and their identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a trip: trip ids are only unique within a route.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TripKey {
    pub route_id: String,
    pub trip_id: String,
}

impl TripKey {
    pub fn new(route_id: impl Into<String>, trip_id: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            trip_id: trip_id.into(),
        }
    }
}

impl fmt::Display for TripKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.route_id, self.trip_id)
    }
}

/// One scheduled run of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub route_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub trip_short_name: Option<String>,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    #[serde(default)]
    pub shape_id: Option<String>,
}

impl Trip {
    pub fn key(&self) -> TripKey {
        TripKey::new(self.route_id.clone(), self.trip_id.clone())
    }

    /// True if both values describe the same trip of the same route.
    pub fn is_same_trip(&self, other: &Trip) -> bool {
        self.route_id == other.route_id && self.trip_id == other.trip_id
    }

    /// Display name: the short name, else the headsign, else an empty string.
    ///
    /// Empty strings count as missing.
    pub fn name(&self) -> &str {
        [&self.trip_short_name, &self.trip_headsign]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}
