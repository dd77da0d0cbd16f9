//! Trip lookups and the current-trip resolver.

use futures::future::try_join_all;
use tracing::{debug, trace};

use super::schedule::{optional_range, trip_times};
use crate::domain::{ScheduleError, StopTimeEntry, TimeOfDay, Trip};
use crate::store::{DocumentStore, extract_docs, keys};

/// Every trip of a route, in store enumeration order.
pub async fn trips_for_route<T>(trips: &T, route_id: &str) -> Result<Vec<Trip>, ScheduleError>
where
    T: DocumentStore<Trip>,
{
    let rows = trips.scan(&keys::route_trips(route_id), true).await?;
    trace!(route_id, trips = rows.len(), "Fetched route trips");
    Ok(extract_docs(rows))
}

/// Look up a trip by id.
///
/// With a route the trip is fetched directly. Without one every trip is
/// scanned and the first whose id matches is returned, since trip ids are
/// only unique within a route.
pub async fn get_trip<T>(
    trips: &T,
    trip_id: &str,
    route_id: Option<&str>,
) -> Result<Trip, ScheduleError>
where
    T: DocumentStore<Trip>,
{
    if let Some(route_id) = route_id {
        return Ok(trips.get(&keys::trip_key(route_id, trip_id)).await?);
    }

    let rows = trips.scan(&keys::all_trips(), false).await?;
    let key = rows
        .into_iter()
        .map(|row| row.key)
        .find(|key| keys::parse_trip_key(key).is_some_and(|parsed| parsed.trip_id == trip_id))
        .ok_or_else(|| ScheduleError::NotFound(format!("trip {trip_id}")))?;

    Ok(trips.get(&key).await?)
}

/// The trip of a route that is running at `now`.
///
/// A trip is running when `now` lies within its schedule range, bounds
/// included. If several are running the one that started earliest wins, and
/// equal starts go to the lowest trip id. If none is running, the first trip
/// in store enumeration order is returned.
///
/// Trips without stop times never count as running. Fails with
/// [`ScheduleError::NotFound`] if the route has no trips at all.
pub async fn current_trip<T, S>(
    trips: &T,
    stop_times: &S,
    route_id: &str,
    now: TimeOfDay,
) -> Result<Trip, ScheduleError>
where
    T: DocumentStore<Trip>,
    S: DocumentStore<StopTimeEntry>,
{
    let route_trips = trips_for_route(trips, route_id).await?;
    let Some(first) = route_trips.first() else {
        return Err(ScheduleError::NotFound(format!("trips of route {route_id}")));
    };

    let ranges = try_join_all(
        route_trips
            .iter()
            .map(|trip| async move { optional_range(trip_times(stop_times, &trip.trip_id).await) }),
    )
    .await?;

    let running = route_trips
        .iter()
        .zip(ranges)
        .filter_map(|(trip, range)| range.filter(|r| r.contains(now)).map(|r| (trip, r)))
        .min_by(|(a, range_a), (b, range_b)| {
            range_a
                .start()
                .cmp(&range_b.start())
                .then_with(|| a.trip_id.cmp(&b.trip_id))
        });

    match running {
        Some((trip, range)) => {
            debug!(
                route_id,
                trip_id = %trip.trip_id,
                start = %range.start(),
                end = %range.end(),
                %now,
                "Found running trip"
            );
            Ok(trip.clone())
        }
        None => {
            debug!(
                route_id,
                trip_id = %first.trip_id,
                %now,
                "No trip running, falling back to first trip"
            );
            Ok(first.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn trip(route: &str, id: &str) -> Trip {
        Trip {
            route_id: route.to_string(),
            trip_id: id.to_string(),
            service_id: "weekday".to_string(),
            trip_short_name: None,
            trip_headsign: None,
            shape_id: None,
        }
    }

    fn store() -> MemoryStore<Trip> {
        MemoryStore::from_docs([
            trip("R1", "T2"),
            trip("R1", "T1"),
            trip("R2", "T1"),
            trip("R10", "T9"),
        ])
    }

    #[tokio::test]
    async fn trips_for_route_is_key_ordered_and_scoped() {
        let trips = trips_for_route(&store(), "R1").await.unwrap();
        let ids: Vec<_> = trips.iter().map(|t| t.trip_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);

        assert!(trips_for_route(&store(), "R3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_trip_with_route() {
        let found = get_trip(&store(), "T1", Some("R2")).await.unwrap();
        assert_eq!(found.key().to_string(), "R2/T1");

        let missing = get_trip(&store(), "T2", Some("R2")).await;
        assert!(matches!(missing, Err(ScheduleError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_trip_without_route_takes_first_match() {
        let found = get_trip(&store(), "T1", None).await.unwrap();
        assert_eq!(found.route_id, "R1");

        let found = get_trip(&store(), "T9", None).await.unwrap();
        assert_eq!(found.route_id, "R10");

        let missing = get_trip(&store(), "T7", None).await;
        assert_eq!(missing, Err(ScheduleError::NotFound("trip T7".into())));
    }
}
