//! The next stop a trip or route will reach.

use futures::future::try_join_all;
use tracing::debug;

use super::schedule::trip_schedule;
use super::trips::trips_for_route;
use crate::domain::{ScheduleError, StopTimeEntry, TimeOfDay, Trip};
use crate::store::DocumentStore;

/// The entry with the earliest arrival at or after `now`.
///
/// Entries arriving before `now` are ignored. When several entries share the
/// earliest arrival, the first one in `stop_times` wins. Returns `None` once
/// every entry is in the past.
///
/// # Examples
///
/// ```
/// use transit_query::domain::{StopTimeEntry, TimeOfDay};
/// use transit_query::query::next_stop_from_list;
///
/// let t = |s| TimeOfDay::parse(s).unwrap();
/// let entries = vec![
///     StopTimeEntry::new("T1", "A", 1, t("08:00:00")),
///     StopTimeEntry::new("T1", "B", 2, t("08:15:00")),
///     StopTimeEntry::new("T1", "C", 3, t("08:30:00")),
/// ];
///
/// let next = next_stop_from_list(&entries, t("08:10:00")).unwrap();
/// assert_eq!(next.stop_id, "B");
/// assert!(next_stop_from_list(&entries, t("08:31:00")).is_none());
/// ```
pub fn next_stop_from_list(
    stop_times: &[StopTimeEntry],
    now: TimeOfDay,
) -> Option<&StopTimeEntry> {
    // min_by_key keeps the first of several equal minima
    stop_times
        .iter()
        .filter(|entry| entry.arrival_time >= now)
        .min_by_key(|entry| entry.arrival_time)
}

/// The next stop of a single trip.
pub async fn next_stop_of_trip<S>(
    stop_times: &S,
    trip_id: &str,
    now: TimeOfDay,
) -> Result<Option<StopTimeEntry>, ScheduleError>
where
    S: DocumentStore<StopTimeEntry>,
{
    let schedule = trip_schedule(stop_times, trip_id).await?;
    Ok(next_stop_from_list(&schedule, now).cloned())
}

/// The next stop reached by any trip of a route.
///
/// Every trip's schedule is fetched concurrently; a failed fetch fails the
/// whole lookup. Schedules are merged in trip enumeration order before the
/// scan, so ties resolve to the earliest-enumerated trip.
pub async fn next_stop_of_route<T, S>(
    trips: &T,
    stop_times: &S,
    route_id: &str,
    now: TimeOfDay,
) -> Result<Option<StopTimeEntry>, ScheduleError>
where
    T: DocumentStore<Trip>,
    S: DocumentStore<StopTimeEntry>,
{
    let route_trips = trips_for_route(trips, route_id).await?;

    let schedules = try_join_all(
        route_trips
            .iter()
            .map(|trip| trip_schedule(stop_times, &trip.trip_id)),
    )
    .await?;

    let merged: Vec<StopTimeEntry> = schedules.into_iter().flatten().collect();
    debug!(
        route_id,
        trips = route_trips.len(),
        entries = merged.len(),
        "Scanning route schedule for next stop"
    );

    Ok(next_stop_from_list(&merged, now).cloned())
}
