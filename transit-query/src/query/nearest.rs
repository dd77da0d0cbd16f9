//! Stop lookup and nearest-stop search.

use tracing::debug;

use crate::domain::{GeoPoint, ScheduleError, Stop};
use crate::store::{DocumentStore, LocationIndex, keys};

pub async fn get_stop<S>(stops: &S, stop_id: &str) -> Result<Stop, ScheduleError>
where
    S: DocumentStore<Stop>,
{
    Ok(stops.get(&keys::stop_key(stop_id)).await?)
}

/// The stop closest to `point`, within `max_distance` degrees if given.
///
/// Distances are planar, in degrees, with no projection correction. Only
/// coordinates are scanned; the winning stop's document is fetched last.
/// When two stops are equally close the first in key order wins.
///
/// Returns `None` if the closest stop is further than `max_distance`. Fails
/// with [`ScheduleError::NotFound`] when there are no stops, and with
/// [`ScheduleError::InvalidArgument`] for a negative or NaN radius.
pub async fn nearest_stop<S>(
    stops: &S,
    point: GeoPoint,
    max_distance: Option<f64>,
) -> Result<Option<Stop>, ScheduleError>
where
    S: DocumentStore<Stop> + LocationIndex,
{
    if let Some(radius) = max_distance.filter(|r| r.is_nan() || *r < 0.0) {
        return Err(ScheduleError::InvalidArgument(format!(
            "radius must be a non-negative number, got {radius}"
        )));
    }

    if !point.lat.is_finite() || !point.lng.is_finite() {
        return Err(ScheduleError::InvalidArgument(format!(
            "point must have finite coordinates, got ({}, {})",
            point.lat, point.lng
        )));
    }

    let locations = stops.locations().await?;
    if locations.is_empty() {
        return Err(ScheduleError::NotFound("stops".to_string()));
    }

    let mut best: Option<(&str, f64)> = None;
    for (key, location) in &locations {
        let distance = location.distance_squared(&point);
        if distance.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((key.as_str(), distance));
        }
    }

    let Some((key, distance)) = best else {
        return Ok(None);
    };

    match max_distance {
        Some(radius) if distance > radius * radius => {
            debug!(
                candidates = locations.len(),
                nearest = key,
                distance = distance.sqrt(),
                radius,
                "Nearest stop is outside radius"
            );
            Ok(None)
        }
        _ => {
            debug!(
                candidates = locations.len(),
                nearest = key,
                distance = distance.sqrt(),
                "Found nearest stop"
            );
            Ok(Some(stops.get(key).await?))
        }
    }
}
