//! Document store error types.

use crate::domain::ScheduleError;

/// Errors returned by a [`DocumentStore`](super::DocumentStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No document exists under the key
    #[error("missing document: {0}")]
    NotFound(String),

    /// The backend failed to answer
    #[error("backend error: {0}")]
    Backend(String),

    /// A snapshot file could not be read or parsed
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<StoreError> for ScheduleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => ScheduleError::NotFound(key),
            other => ScheduleError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found() {
        let err: ScheduleError = StoreError::NotFound("stop/S1".into()).into();
        assert_eq!(err, ScheduleError::NotFound("stop/S1".into()));
    }

    #[test]
    fn backend_maps_to_store() {
        let err: ScheduleError = StoreError::Backend("timeout".into()).into();
        assert_eq!(err, ScheduleError::Store("backend error: timeout".into()));
    }
}
