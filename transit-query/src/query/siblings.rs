//! The trips that run immediately before and after a given trip.

use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

use super::schedule::{optional_range, trip_times};
use super::trips::trips_for_route;
use crate::domain::{ScheduleError, ScheduleRange, StopTimeEntry, TimeOfDay, Trip};
use crate::store::DocumentStore;

/// Neighbouring trips on the same route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Siblings {
    pub previous: Option<Trip>,
    pub following: Option<Trip>,
}

type Candidate<'a> = (&'a Trip, ScheduleRange);

/// The trips of the same route that run just before and just after `trip`.
///
/// Candidates are split into those ending strictly before `trip` starts and
/// those starting strictly after it ends; overlapping or touching trips are
/// ignored. `previous` is the latest-ending earlier trip, `following` the
/// earliest-starting later one.
///
/// When one side is empty the other side wraps around the service day: with
/// no earlier trip, `previous` is the latest-starting later trip (yesterday's
/// last run), and with no later trip, `following` is the earliest-starting
/// earlier trip (tomorrow's first run). Ties go to the lowest trip id.
///
/// A trip without stop times has no siblings. Candidates without stop times
/// are skipped.
pub async fn sibling_trips<T, S>(
    trips: &T,
    stop_times: &S,
    trip: &Trip,
) -> Result<Siblings, ScheduleError>
where
    T: DocumentStore<Trip>,
    S: DocumentStore<StopTimeEntry>,
{
    let (own, route_trips) = futures::try_join!(
        async { optional_range(trip_times(stop_times, &trip.trip_id).await) },
        trips_for_route(trips, &trip.route_id),
    )?;

    let Some(own) = own else {
        debug!(trip = %trip.key(), "Trip has no stop times, no siblings");
        return Ok(Siblings::default());
    };

    let candidates: Vec<&Trip> = route_trips
        .iter()
        .filter(|candidate| !candidate.is_same_trip(trip))
        .collect();

    let ranges = try_join_all(
        candidates
            .iter()
            .map(|candidate| async move {
                optional_range(trip_times(stop_times, &candidate.trip_id).await)
            }),
    )
    .await?;

    let mut before = Vec::new();
    let mut after = Vec::new();
    for (candidate, range) in candidates.into_iter().zip(ranges) {
        let Some(range) = range else {
            continue;
        };
        if range.ends_before(&own) {
            before.push((candidate, range));
        } else if range.starts_after(&own) {
            after.push((candidate, range));
        }
    }

    let previous = latest_by(&before, ScheduleRange::end)
        .or_else(|| latest_by(&after, ScheduleRange::start));
    let following = earliest_by(&after, ScheduleRange::start)
        .or_else(|| earliest_by(&before, ScheduleRange::start));

    debug!(
        trip = %trip.key(),
        before = before.len(),
        after = after.len(),
        previous = previous.map(|t| t.trip_id.as_str()),
        following = following.map(|t| t.trip_id.as_str()),
        "Resolved sibling trips"
    );

    Ok(Siblings {
        previous: previous.cloned(),
        following: following.cloned(),
    })
}

fn earliest_by<'a>(
    candidates: &[Candidate<'a>],
    time: impl Fn(&ScheduleRange) -> TimeOfDay,
) -> Option<&'a Trip> {
    candidates
        .iter()
        .min_by(|(a, range_a), (b, range_b)| {
            time(range_a)
                .cmp(&time(range_b))
                .then_with(|| a.trip_id.cmp(&b.trip_id))
        })
        .map(|(trip, _)| *trip)
}

fn latest_by<'a>(
    candidates: &[Candidate<'a>],
    time: impl Fn(&ScheduleRange) -> TimeOfDay,
) -> Option<&'a Trip> {
    // Reversed id order so the lowest id counts as the maximum on a tie
    candidates
        .iter()
        .max_by(|(a, range_a), (b, range_b)| {
            time(range_a)
                .cmp(&time(range_b))
                .then_with(|| b.trip_id.cmp(&a.trip_id))
        })
        .map(|(trip, _)| *trip)
}
