//! Schedule queries.
//!
//! Resolvers take store handles plus identifiers and return domain values.
//! Per-trip fetches within one query run concurrently and are joined before
//! any reduction; the first failed fetch fails the whole query.
//!
//! [`Timetable`] bundles the resolvers over a [`ScheduleSource`](crate::store::ScheduleSource).

mod calendar;
mod config;
mod nearest;
mod next_stop;
mod schedule;
mod shapes;
mod siblings;
mod timetable;
mod trips;


pub use calendar::service_days;
pub use config::QueryConfig;
pub use nearest::{get_stop, nearest_stop};
pub use next_stop::{next_stop_from_list, next_stop_of_route, next_stop_of_trip};
pub use schedule::{FirstLastStop, first_and_last_stop, schedule_range, trip_schedule, trip_times};
pub use shapes::{shape_as_feature, shape_points, stop_as_feature};
pub use siblings::{Siblings, sibling_trips};
pub use timetable::Timetable;
pub use trips::{current_trip, get_trip, trips_for_route};
