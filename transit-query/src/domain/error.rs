//! Query error types.
//!
//! These errors cover lookups that find nothing, trips without timetable
//! data, and invalid inputs. Store backend failures are folded in as
//! [`ScheduleError::Store`].

/// Errors returned by schedule queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// No matching document, trip, route or stop
    #[error("not found: {0}")]
    NotFound(String),

    /// The trip exists but has no stop times
    #[error("trip has no stop times")]
    EmptySchedule,

    /// A value is in a state the operation cannot handle
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A caller-supplied argument is malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The document store failed for a reason other than a missing key
    #[error("store error: {0}")]
    Store(String),
}
