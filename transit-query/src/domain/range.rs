//! Time-of-day ranges covered by a trip.

use chrono::Duration;
use serde::Serialize;

use super::TimeOfDay;

/// The span of a trip's schedule, from its earliest to its latest arrival.
///
/// No wraparound normalization is applied: a trip running from 23:30 to
/// 25:10 keeps `end = 25:10:00`, so a wall-clock reference of 00:30 does not
/// fall inside it.
///
/// # Examples
///
/// ```
/// use transit_query::domain::{ScheduleRange, TimeOfDay};
///
/// let t = |s| TimeOfDay::parse(s).unwrap();
/// let range = ScheduleRange::new(t("08:00:00"), t("08:30:00")).unwrap();
///
/// assert!(range.contains(t("08:10:00")));
/// assert!(range.contains(t("08:30:00")));
/// assert!(!range.contains(t("08:31:00")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduleRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl ScheduleRange {
    /// Create a range, returning `None` if `end` is before `start`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Smallest range covering every time in the iterator.
    ///
    /// Returns `None` for an empty iterator.
    pub fn spanning(times: impl IntoIterator<Item = TimeOfDay>) -> Option<Self> {
        times.into_iter().fold(None, |range, time| match range {
            None => Some(Self {
                start: time,
                end: time,
            }),
            Some(Self { start, end }) => Some(Self {
                start: start.min(time),
                end: end.max(time),
            }),
        })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True if `time` lies within the range, inclusive at both ends.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time <= self.end
    }

    /// True if the two ranges share at least one instant.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True if this range finishes strictly before `other` begins.
    pub fn ends_before(&self, other: &Self) -> bool {
        self.end < other.start
    }

    /// True if this range begins strictly after `other` finishes.
    pub fn starts_after(&self, other: &Self) -> bool {
        self.start > other.end
    }
}
