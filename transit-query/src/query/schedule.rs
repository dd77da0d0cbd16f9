//! Schedule ranges and first/last stops of a trip.

use serde::Serialize;
use tracing::trace;

use crate::domain::{ScheduleError, ScheduleRange, StopTimeEntry};
use crate::store::{DocumentStore, extract_docs, keys};

/// The stops a trip starts and ends at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstLastStop {
    pub first_stop_id: String,
    pub last_stop_id: String,
}

/// Earliest and latest arrival across a trip's stop times.
///
/// Fails with [`ScheduleError::EmptySchedule`] when there are no entries;
/// callers should treat that as "no timetable data", not as a zero-length
/// range.
pub fn schedule_range(stop_times: &[StopTimeEntry]) -> Result<ScheduleRange, ScheduleError> {
    ScheduleRange::spanning(stop_times.iter().map(|entry| entry.arrival_time))
        .ok_or(ScheduleError::EmptySchedule)
}

/// Turn an [`ScheduleError::EmptySchedule`] into `None`, keeping other errors.
pub(crate) fn optional_range(
    result: Result<ScheduleRange, ScheduleError>,
) -> Result<Option<ScheduleRange>, ScheduleError> {
    match result {
        Ok(range) => Ok(Some(range)),
        Err(ScheduleError::EmptySchedule) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Every stop time of a trip, in stop-sequence order.
pub async fn trip_schedule<S>(
    stop_times: &S,
    trip_id: &str,
) -> Result<Vec<StopTimeEntry>, ScheduleError>
where
    S: DocumentStore<StopTimeEntry>,
{
    let rows = stop_times
        .scan(&keys::trip_stop_times(trip_id), true)
        .await?;
    trace!(trip_id, entries = rows.len(), "Fetched trip schedule");
    Ok(extract_docs(rows))
}

/// The time range a trip covers.
pub async fn trip_times<S>(stop_times: &S, trip_id: &str) -> Result<ScheduleRange, ScheduleError>
where
    S: DocumentStore<StopTimeEntry>,
{
    schedule_range(&trip_schedule(stop_times, trip_id).await?)
}

/// The first and last stop of a trip, or `None` if it has no stop times.
///
/// Only keys are scanned; the two boundary documents are then fetched
/// concurrently.
pub async fn first_and_last_stop<S>(
    stop_times: &S,
    trip_id: &str,
) -> Result<Option<FirstLastStop>, ScheduleError>
where
    S: DocumentStore<StopTimeEntry>,
{
    let mut ids: Vec<String> = stop_times
        .scan(&keys::trip_stop_times(trip_id), false)
        .await?
        .into_iter()
        .map(|row| row.key)
        .collect();
    ids.sort();

    let (Some(first), Some(last)) = (ids.first(), ids.last()) else {
        return Ok(None);
    };

    let (first, last) = futures::try_join!(stop_times.get(first), stop_times.get(last))?;

    Ok(Some(FirstLastStop {
        first_stop_id: first.stop_id,
        last_stop_id: last.stop_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeOfDay;
    use crate::store::MemoryStore;

    fn entry(trip: &str, stop: &str, seq: u32, arrival: &str) -> StopTimeEntry {
        StopTimeEntry::new(trip, stop, seq, TimeOfDay::parse(arrival).unwrap())
    }

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn range_of_unordered_entries() {
        let entries = vec![
            entry("T1", "B", 2, "08:15:00"),
            entry("T1", "C", 3, "08:30:00"),
            entry("T1", "A", 1, "08:00:00"),
        ];
        let range = schedule_range(&entries).unwrap();
        assert_eq!(range.start(), t("08:00:00"));
        assert_eq!(range.end(), t("08:30:00"));
        assert!(range.contains(t("08:10:00")));
        assert!(!range.contains(t("07:59:00")));
        assert!(!range.contains(t("08:31:00")));
    }

    #[test]
    fn empty_schedule_is_an_error() {
        assert_eq!(schedule_range(&[]), Err(ScheduleError::EmptySchedule));
        assert_eq!(optional_range(schedule_range(&[])), Ok(None));
    }

    #[test]
    fn optional_range_keeps_other_errors() {
        let err = ScheduleError::Store("down".into());
        assert_eq!(optional_range(Err(err.clone())), Err(err));
    }

    #[tokio::test]
    async fn first_and_last_follow_sequence_not_insertion() {
        // Sequence 10 must sort after 9 once encoded
        let store = MemoryStore::from_docs([
            entry("T1", "LAST", 10, "09:00:00"),
            entry("T1", "FIRST", 1, "08:00:00"),
            entry("T1", "MIDDLE", 9, "08:50:00"),
            entry("T2", "OTHER", 1, "07:00:00"),
        ]);

        let result = first_and_last_stop(&store, "T1").await.unwrap().unwrap();
        assert_eq!(result.first_stop_id, "FIRST");
        assert_eq!(result.last_stop_id, "LAST");
    }

    #[tokio::test]
    async fn first_and_last_with_seven_digit_sequences() {
        let store = MemoryStore::from_docs([
            entry("T1", "LAST", 1_000_000, "09:00:00"),
            entry("T1", "FIRST", 200_000, "08:00:00"),
        ]);

        let result = first_and_last_stop(&store, "T1").await.unwrap().unwrap();
        assert_eq!(result.first_stop_id, "FIRST");
        assert_eq!(result.last_stop_id, "LAST");

        let schedule = trip_schedule(&store, "T1").await.unwrap();
        let sequence: Vec<_> = schedule.iter().map(|e| e.stop_sequence).collect();
        assert_eq!(sequence, vec![200_000, 1_000_000]);
    }

    #[tokio::test]
    async fn first_and_last_of_unknown_trip_is_none() {
        let store: MemoryStore<StopTimeEntry> = MemoryStore::new();
        assert_eq!(first_and_last_stop(&store, "T1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn trip_schedule_is_scoped_to_trip() {
        let store = MemoryStore::from_docs([
            entry("T1", "A", 2, "08:10:00"),
            entry("T1", "B", 1, "08:00:00"),
            entry("T10", "C", 1, "06:00:00"),
        ]);

        let schedule = trip_schedule(&store, "T1").await.unwrap();
        let stops: Vec<_> = schedule.iter().map(|e| e.stop_id.as_str()).collect();
        assert_eq!(stops, vec!["B", "A"]);

        let range = trip_times(&store, "T1").await.unwrap();
        assert_eq!(range.start(), t("08:00:00"));

        assert_eq!(
            trip_times(&store, "T2").await,
            Err(ScheduleError::EmptySchedule)
        );
    }
}
