//! Service calendar entries.

use serde::{Deserialize, Serialize};

/// A regular weekly service pattern, as in GTFS `calendar.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub service_id: String,
    #[serde(default)]
    pub sunday: bool,
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
}

impl CalendarEntry {
    /// The seven weekday flags, Sunday first.
    pub fn flags(&self) -> [bool; 7] {
        [
            self.sunday,
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
        ]
    }
}
