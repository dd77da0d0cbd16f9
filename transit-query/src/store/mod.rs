//! Read-only document store abstraction.
//!
//! Queries never talk to a storage engine directly. They go through
//! [`DocumentStore`], which exposes key lookup and ordered key-range scans,
//! and [`LocationIndex`], which lists coordinates without loading whole
//! documents. [`MemoryStore`] is the in-process implementation used by tests
//! and the command-line tool; [`CachedStore`] adds a TTL cache in front of
//! any other store.

mod cached;
mod error;
pub mod keys;
mod memory;
mod snapshot;

pub use cached::{CacheConfig, CachedSchedule, CachedStore};
pub use error::StoreError;
pub use keys::{KeyRange, StorageKey};
pub use memory::MemoryStore;
pub use snapshot::{ScheduleStores, Snapshot};

use crate::domain::{CalendarEntry, GeoPoint, ShapePoint, Stop, StopTimeEntry, Trip};

/// One row of a key-range scan.
///
/// `doc` is `None` when the scan was made without `include_docs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<D> {
    pub key: String,
    pub doc: Option<D>,
}

impl<D> Row<D> {
    pub fn new(key: impl Into<String>, doc: Option<D>) -> Self {
        Self {
            key: key.into(),
            doc,
        }
    }
}

/// Collect the documents of a scan, skipping rows without one.
pub fn extract_docs<D>(rows: Vec<Row<D>>) -> Vec<D> {
    rows.into_iter().filter_map(|row| row.doc).collect()
}

/// A read-only, key-ordered document store.
///
/// Scans return rows in ascending key order. Callers rely on that order
/// being stable between calls.
#[allow(async_fn_in_trait)]
pub trait DocumentStore<D> {
    /// Fetch a single document.
    ///
    /// Fails with [`StoreError::NotFound`] if the key is absent.
    async fn get(&self, key: &str) -> Result<D, StoreError>;

    /// Fetch every row with `start <= key <= end`.
    ///
    /// Returns an empty list when nothing matches.
    async fn range(
        &self,
        start: &str,
        end: &str,
        include_docs: bool,
    ) -> Result<Vec<Row<D>>, StoreError>;

    /// Fetch every row in the store.
    async fn list_all(&self, include_docs: bool) -> Result<Vec<Row<D>>, StoreError>;

    /// Fetch every row whose key falls in `range`.
    async fn scan(&self, range: &KeyRange, include_docs: bool) -> Result<Vec<Row<D>>, StoreError> {
        self.range(&range.start, &range.end, include_docs).await
    }
}

/// Documents that have a position on the map.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for Stop {
    fn location(&self) -> GeoPoint {
        Stop::location(self)
    }
}

impl Located for ShapePoint {
    fn location(&self) -> GeoPoint {
        ShapePoint::location(self)
    }
}

/// Lists document coordinates without loading the documents themselves.
#[allow(async_fn_in_trait)]
pub trait LocationIndex {
    /// Every `(key, coordinate)` pair, in key order.
    async fn locations(&self) -> Result<Vec<(String, GeoPoint)>, StoreError>;
}

/// One store per kind of schedule record.
///
/// Lets query code be written once against both plain and cached stores.
pub trait ScheduleSource {
    type Trips: DocumentStore<Trip>;
    type StopTimes: DocumentStore<StopTimeEntry>;
    type Stops: DocumentStore<Stop> + LocationIndex;
    type Calendar: DocumentStore<CalendarEntry>;
    type Shapes: DocumentStore<ShapePoint>;

    fn trips(&self) -> &Self::Trips;
    fn stop_times(&self) -> &Self::StopTimes;
    fn stops(&self) -> &Self::Stops;
    fn calendar(&self) -> &Self::Calendar;
    fn shapes(&self) -> &Self::Shapes;
}
