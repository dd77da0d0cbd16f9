//! Storage key layout.
//!
//! Keys are plain strings whose lexicographic order groups related
//! documents: every trip of a route shares the `trip/{route_id}/` prefix and
//! every stop time of a trip shares `time/{trip_id}/`. Sequence numbers are
//! zero-padded so that key order matches numeric order.
//!
//! Prefix ranges assume ids never contain `/`. A trip id such as `T1/x`
//! would have its stop times listed inside the range of trip `T1`.

use crate::domain::{CalendarEntry, ShapePoint, Stop, StopTimeEntry, Trip, TripKey};

/// Sorts after any character that appears in an identifier.
const HIGH_SENTINEL: char = '\u{ffff}';

/// Width that sequence numbers are zero-padded to: the digits of `u32::MAX`.
pub const SEQUENCE_WIDTH: usize = 10;

/// An inclusive key range covering every key with a given prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: String,
    pub end: String,
}

impl KeyRange {
    pub fn prefix(prefix: String) -> Self {
        let end = format!("{prefix}{HIGH_SENTINEL}");
        Self { start: prefix, end }
    }
}

pub fn trip_key(route_id: &str, trip_id: &str) -> String {
    format!("trip/{route_id}/{trip_id}")
}

/// Every trip of a route.
pub fn route_trips(route_id: &str) -> KeyRange {
    KeyRange::prefix(format!("trip/{route_id}/"))
}

/// Every trip of every route.
pub fn all_trips() -> KeyRange {
    KeyRange::prefix("trip/".to_string())
}

/// Recover the route and trip ids from a trip key.
///
/// # Examples
///
/// ```
/// use transit_query::store::keys;
///
/// let key = keys::trip_key("R1", "T7");
/// let parsed = keys::parse_trip_key(&key).unwrap();
/// assert_eq!(parsed.route_id, "R1");
/// assert_eq!(parsed.trip_id, "T7");
///
/// assert!(keys::parse_trip_key("stop/S1").is_none());
/// ```
pub fn parse_trip_key(key: &str) -> Option<TripKey> {
    let rest = key.strip_prefix("trip/")?;
    let (route_id, trip_id) = rest.split_once('/')?;
    if route_id.is_empty() || trip_id.is_empty() {
        return None;
    }
    Some(TripKey::new(route_id, trip_id))
}

pub fn stop_time_key(trip_id: &str, stop_sequence: u32) -> String {
    format!("time/{trip_id}/{stop_sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Every stop time of a trip, in stop-sequence order.
pub fn trip_stop_times(trip_id: &str) -> KeyRange {
    KeyRange::prefix(format!("time/{trip_id}/"))
}

pub fn stop_key(stop_id: &str) -> String {
    format!("stop/{stop_id}")
}

pub fn calendar_key(service_id: &str) -> String {
    format!("calendar/{service_id}")
}

pub fn shape_point_key(shape_id: &str, sequence: u32) -> String {
    format!("shape/{shape_id}/{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Every point of a shape, in sequence order.
pub fn shape_points(shape_id: &str) -> KeyRange {
    KeyRange::prefix(format!("shape/{shape_id}/"))
}

/// Documents that know the key they are stored under.
pub trait StorageKey {
    fn storage_key(&self) -> String;
}

impl StorageKey for Trip {
    fn storage_key(&self) -> String {
        trip_key(&self.route_id, &self.trip_id)
    }
}

impl StorageKey for StopTimeEntry {
    fn storage_key(&self) -> String {
        stop_time_key(&self.trip_id, self.stop_sequence)
    }
}

impl StorageKey for Stop {
    fn storage_key(&self) -> String {
        stop_key(&self.stop_id)
    }
}

impl StorageKey for CalendarEntry {
    fn storage_key(&self) -> String {
        calendar_key(&self.service_id)
    }
}

impl StorageKey for ShapePoint {
    fn storage_key(&self) -> String {
        shape_point_key(&self.shape_id, self.shape_pt_sequence)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Key order of encoded stop sequences matches numeric order
        #[test]
        fn sequence_key_order_matches_numeric(a in any::<u32>(), b in any::<u32>()) {
            let ka = stop_time_key("T1", a);
            let kb = stop_time_key("T1", b);
            prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
        }

        /// Every stop time key of a trip falls inside that trip's range
        #[test]
        fn stop_time_keys_within_trip_range(seq in any::<u32>(), trip in "[A-Za-z0-9_]{1,12}") {
            let range = trip_stop_times(&trip);
            let key = stop_time_key(&trip, seq);
            prop_assert!(range.start <= key && key <= range.end);
        }

        /// Shape point keys sort like their sequence numbers
        #[test]
        fn shape_key_order_matches_numeric(a in any::<u32>(), b in any::<u32>()) {
            let ka = shape_point_key("SH", a);
            let kb = shape_point_key("SH", b);
            prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
        }
    }
}
