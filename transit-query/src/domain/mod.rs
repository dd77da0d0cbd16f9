//! Domain types for transit schedule queries.
//!
//! All values here are read-only records built from fetched documents.
//! Types that carry invariants enforce them at construction time.

mod calendar;
mod error;
mod range;
mod shape;
mod stop;
mod stop_time;
mod time;
mod trip;
mod weekday;

pub use calendar::CalendarEntry;
pub use error::ScheduleError;
pub use range::ScheduleRange;
pub use shape::ShapePoint;
pub use stop::{GeoPoint, Stop};
pub use stop_time::StopTimeEntry;
pub use time::{TimeError, TimeOfDay};
pub use trip::{Trip, TripKey};
pub use weekday::{DayNameStyle, WEEKDAYS, WeekdaySet};
