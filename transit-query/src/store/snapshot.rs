//! Schedule snapshots loaded from JSON.
//!
//! A snapshot holds already-extracted schedule records and turns them into
//! in-memory stores. This is useful for development, the command-line tool,
//! and tests that need a realistic schedule without a database.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{MemoryStore, ScheduleSource, StoreError};
use crate::domain::{CalendarEntry, ShapePoint, Stop, StopTimeEntry, Trip};

/// Schedule records as they appear in a snapshot file.
///
/// Every section is optional and defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub stop_times: Vec<StopTimeEntry>,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub calendar: Vec<CalendarEntry>,
    #[serde(default)]
    pub shapes: Vec<ShapePoint>,
}

/// One in-memory store per kind of schedule record.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStores {
    pub trips: MemoryStore<Trip>,
    pub stop_times: MemoryStore<StopTimeEntry>,
    pub stops: MemoryStore<Stop>,
    pub calendar: MemoryStore<CalendarEntry>,
    pub shapes: MemoryStore<ShapePoint>,
}

impl ScheduleSource for ScheduleStores {
    type Trips = MemoryStore<Trip>;
    type StopTimes = MemoryStore<StopTimeEntry>;
    type Stops = MemoryStore<Stop>;
    type Calendar = MemoryStore<CalendarEntry>;
    type Shapes = MemoryStore<ShapePoint>;

    fn trips(&self) -> &Self::Trips {
        &self.trips
    }

    fn stop_times(&self) -> &Self::StopTimes {
        &self.stop_times
    }

    fn stops(&self) -> &Self::Stops {
        &self.stops
    }

    fn calendar(&self) -> &Self::Calendar {
        &self.calendar
    }

    fn shapes(&self) -> &Self::Shapes {
        &self.shapes
    }
}

impl Snapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    /// Read and parse a snapshot file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Snapshot(format!("failed to read {path:?}: {e}")))?;
        Self::from_json(&json)
    }

    /// Build the in-memory stores.
    ///
    /// Records sharing a storage key replace earlier ones.
    pub fn into_stores(self) -> ScheduleStores {
        let stores = ScheduleStores {
            trips: MemoryStore::from_docs(self.trips),
            stop_times: MemoryStore::from_docs(self.stop_times),
            stops: MemoryStore::from_docs(self.stops),
            calendar: MemoryStore::from_docs(self.calendar),
            shapes: MemoryStore::from_docs(self.shapes),
        };

        debug!(
            trips = stores.trips.len(),
            stop_times = stores.stop_times.len(),
            stops = stores.stops.len(),
            calendar = stores.calendar.len(),
            shapes = stores.shapes.len(),
            "Loaded schedule snapshot"
        );

        stores
    }
}
