//! Query façade over a set of schedule stores.

use geojson::Feature;

use super::calendar::service_days;
use super::config::QueryConfig;
use super::nearest::{get_stop, nearest_stop};
use super::next_stop::{next_stop_of_route, next_stop_of_trip};
use super::schedule::{FirstLastStop, first_and_last_stop, trip_times};
use super::shapes::{shape_as_feature, shape_points, stop_as_feature};
use super::siblings::{Siblings, sibling_trips};
use super::trips::{current_trip, get_trip, trips_for_route};
use crate::domain::{
    GeoPoint, ScheduleError, ScheduleRange, Stop, StopTimeEntry, TimeOfDay, Trip, WeekdaySet,
};
use crate::store::ScheduleSource;

/// Answers schedule questions against one [`ScheduleSource`].
///
/// Methods taking an optional reference time use the current local time of
/// day when none is given.
pub struct Timetable<'a, S: ScheduleSource> {
    source: &'a S,
    config: &'a QueryConfig,
}

impl<'a, S: ScheduleSource> Timetable<'a, S> {
    /// Create a new timetable.
    pub fn new(source: &'a S, config: &'a QueryConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &QueryConfig {
        self.config
    }

    pub async fn trip(&self, trip_id: &str, route_id: Option<&str>) -> Result<Trip, ScheduleError> {
        get_trip(self.source.trips(), trip_id, route_id).await
    }

    pub async fn route_trips(&self, route_id: &str) -> Result<Vec<Trip>, ScheduleError> {
        trips_for_route(self.source.trips(), route_id).await
    }

    pub async fn trip_times(&self, trip_id: &str) -> Result<ScheduleRange, ScheduleError> {
        trip_times(self.source.stop_times(), trip_id).await
    }

    pub async fn first_and_last_stop(
        &self,
        trip_id: &str,
    ) -> Result<Option<FirstLastStop>, ScheduleError> {
        first_and_last_stop(self.source.stop_times(), trip_id).await
    }

    /// The trip of `route_id` running at `now`.
    pub async fn current_trip(
        &self,
        route_id: &str,
        now: Option<TimeOfDay>,
    ) -> Result<Trip, ScheduleError> {
        current_trip(
            self.source.trips(),
            self.source.stop_times(),
            route_id,
            now.unwrap_or_else(TimeOfDay::now),
        )
        .await
    }

    /// Trips running immediately before and after a trip.
    pub async fn siblings(
        &self,
        trip_id: &str,
        route_id: Option<&str>,
    ) -> Result<Siblings, ScheduleError> {
        let trip = self.trip(trip_id, route_id).await?;
        sibling_trips(self.source.trips(), self.source.stop_times(), &trip).await
    }

    pub async fn next_stop_of_trip(
        &self,
        trip_id: &str,
        now: Option<TimeOfDay>,
    ) -> Result<Option<StopTimeEntry>, ScheduleError> {
        next_stop_of_trip(
            self.source.stop_times(),
            trip_id,
            now.unwrap_or_else(TimeOfDay::now),
        )
        .await
    }

    pub async fn next_stop_of_route(
        &self,
        route_id: &str,
        now: Option<TimeOfDay>,
    ) -> Result<Option<StopTimeEntry>, ScheduleError> {
        next_stop_of_route(
            self.source.trips(),
            self.source.stop_times(),
            route_id,
            now.unwrap_or_else(TimeOfDay::now),
        )
        .await
    }

    pub async fn stop(&self, stop_id: &str) -> Result<Stop, ScheduleError> {
        get_stop(self.source.stops(), stop_id).await
    }

    /// Nearest stop to `point`, using the configured radius when none is given.
    ///
    /// `None` means "use the configured default", not "unbounded"; use
    /// [`nearest_stop_unbounded`](Self::nearest_stop_unbounded) to ignore
    /// the configured radius.
    pub async fn nearest_stop(
        &self,
        point: GeoPoint,
        max_distance: Option<f64>,
    ) -> Result<Option<Stop>, ScheduleError> {
        let radius = max_distance.or(self.config.max_stop_distance);
        nearest_stop(self.source.stops(), point, radius).await
    }

    /// Nearest stop to `point` at any distance, whatever radius is configured.
    pub async fn nearest_stop_unbounded(
        &self,
        point: GeoPoint,
    ) -> Result<Option<Stop>, ScheduleError> {
        nearest_stop(self.source.stops(), point, None).await
    }

    pub async fn service_days(&self, service_id: &str) -> Result<WeekdaySet, ScheduleError> {
        service_days(self.source.calendar(), service_id).await
    }

    /// Service days formatted with the configured day names, e.g. "Monday - Friday".
    pub async fn service_days_label(&self, service_id: &str) -> Result<String, ScheduleError> {
        self.service_days(service_id)
            .await?
            .format(self.config.day_name_style)
    }

    /// The path of a shape as a GeoJSON line.
    pub async fn shape_feature(&self, shape_id: &str) -> Result<Feature, ScheduleError> {
        let points = shape_points(self.source.shapes(), shape_id).await?;
        if points.is_empty() {
            return Err(ScheduleError::NotFound(format!("shape {shape_id}")));
        }
        shape_as_feature(&points)
    }

    pub async fn stop_feature(&self, stop_id: &str) -> Result<Feature, ScheduleError> {
        Ok(stop_as_feature(&self.stop(stop_id).await?))
    }
}
