//! Scheduled stop visits.

use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// One scheduled visit of a trip to a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTimeEntry {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: TimeOfDay,
    #[serde(default)]
    pub departure_time: Option<TimeOfDay>,
}

impl StopTimeEntry {
    pub fn new(
        trip_id: impl Into<String>,
        stop_id: impl Into<String>,
        stop_sequence: u32,
        arrival_time: TimeOfDay,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            stop_id: stop_id.into(),
            stop_sequence,
            arrival_time,
            departure_time: None,
        }
    }

    /// Departure time, falling back to the arrival time.
    pub fn departure(&self) -> TimeOfDay {
        self.departure_time.unwrap_or(self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_gtfs_times() {
        let json = r#"{
            "trip_id": "T1",
            "stop_id": "S1",
            "stop_sequence": 3,
            "arrival_time": "24:05:00"
        }"#;
        let entry: StopTimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.arrival_time, TimeOfDay::parse("24:05:00").unwrap());
        assert_eq!(entry.departure(), entry.arrival_time);
    }

    #[test]
    fn departure_prefers_explicit_value() {
        let mut entry =
            StopTimeEntry::new("T1", "S1", 1, TimeOfDay::parse("08:00:00").unwrap());
        entry.departure_time = Some(TimeOfDay::parse("08:02:00").unwrap());
        assert_eq!(entry.departure(), TimeOfDay::parse("08:02:00").unwrap());
    }
}
