//! Caching layer in front of a document store.
//!
//! Schedules are read far more often than they change, and resolvers fetch
//! the same trip schedules over and over (every sibling lookup scans the
//! whole route). Results of `get` and range scans are kept for a bounded
//! time; errors are never cached.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use super::{
    DocumentStore, LocationIndex, MemoryStore, Row, ScheduleSource, ScheduleStores, StoreError,
};
use crate::domain::{CalendarEntry, GeoPoint, ShapePoint, Stop, StopTimeEntry, Trip};

/// Cache key for scans: explicit bounds or the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ScanKey {
    Range {
        start: String,
        end: String,
        include_docs: bool,
    },
    All {
        include_docs: bool,
    },
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries, per kind of lookup.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Document store with caching.
///
/// Wraps another store and caches its answers.
pub struct CachedStore<S, D> {
    inner: S,
    docs: MokaCache<String, D>,
    scans: MokaCache<ScanKey, Arc<Vec<Row<D>>>>,
    locations: MokaCache<(), Arc<Vec<(String, GeoPoint)>>>,
    _doc: PhantomData<fn() -> D>,
}

impl<S, D> CachedStore<S, D>
where
    D: Clone + Send + Sync + 'static,
{
    /// Create a new cached store.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        Self {
            inner,
            docs: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            scans: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            locations: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(1)
                .build(),
            _doc: PhantomData,
        }
    }

    /// Access the underlying store for lookups that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached documents and scans (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.docs.entry_count() + self.scans.entry_count() + self.locations.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.docs.invalidate_all();
        self.scans.invalidate_all();
        self.locations.invalidate_all();
    }

    async fn cached_scan<F>(&self, key: ScanKey, fetch: F) -> Result<Vec<Row<D>>, StoreError>
    where
        F: Future<Output = Result<Vec<Row<D>>, StoreError>>,
    {
        if let Some(rows) = self.scans.get(&key).await {
            trace!(?key, "scan cache hit");
            return Ok(rows.as_ref().clone());
        }

        let rows = fetch.await?;
        self.scans.insert(key, Arc::new(rows.clone())).await;
        Ok(rows)
    }
}

impl<S, D> DocumentStore<D> for CachedStore<S, D>
where
    S: DocumentStore<D>,
    D: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<D, StoreError> {
        if let Some(doc) = self.docs.get(key).await {
            return Ok(doc);
        }

        let doc = self.inner.get(key).await?;
        self.docs.insert(key.to_string(), doc.clone()).await;
        Ok(doc)
    }

    async fn range(
        &self,
        start: &str,
        end: &str,
        include_docs: bool,
    ) -> Result<Vec<Row<D>>, StoreError> {
        let key = ScanKey::Range {
            start: start.to_string(),
            end: end.to_string(),
            include_docs,
        };
        self.cached_scan(key, self.inner.range(start, end, include_docs))
            .await
    }

    async fn list_all(&self, include_docs: bool) -> Result<Vec<Row<D>>, StoreError> {
        self.cached_scan(
            ScanKey::All { include_docs },
            self.inner.list_all(include_docs),
        )
        .await
    }
}

impl<S, D> LocationIndex for CachedStore<S, D>
where
    S: LocationIndex,
    D: Clone + Send + Sync + 'static,
{
    async fn locations(&self) -> Result<Vec<(String, GeoPoint)>, StoreError> {
        if let Some(cached) = self.locations.get(&()).await {
            return Ok(cached.as_ref().clone());
        }

        let locations = self.inner.locations().await?;
        self.locations.insert((), Arc::new(locations.clone())).await;
        Ok(locations)
    }
}

/// [`ScheduleStores`] with every store behind its own cache.
pub struct CachedSchedule {
    pub trips: CachedStore<MemoryStore<Trip>, Trip>,
    pub stop_times: CachedStore<MemoryStore<StopTimeEntry>, StopTimeEntry>,
    pub stops: CachedStore<MemoryStore<Stop>, Stop>,
    pub calendar: CachedStore<MemoryStore<CalendarEntry>, CalendarEntry>,
    pub shapes: CachedStore<MemoryStore<ShapePoint>, ShapePoint>,
}

impl CachedSchedule {
    pub fn new(stores: ScheduleStores, config: &CacheConfig) -> Self {
        Self {
            trips: CachedStore::new(stores.trips, config),
            stop_times: CachedStore::new(stores.stop_times, config),
            stops: CachedStore::new(stores.stops, config),
            calendar: CachedStore::new(stores.calendar, config),
            shapes: CachedStore::new(stores.shapes, config),
        }
    }
}

impl ScheduleSource for CachedSchedule {
    type Trips = CachedStore<MemoryStore<Trip>, Trip>;
    type StopTimes = CachedStore<MemoryStore<StopTimeEntry>, StopTimeEntry>;
    type Stops = CachedStore<MemoryStore<Stop>, Stop>;
    type Calendar = CachedStore<MemoryStore<CalendarEntry>, CalendarEntry>;
    type Shapes = CachedStore<MemoryStore<ShapePoint>, ShapePoint>;

    fn trips(&self) -> &Self::Trips {
        &self.trips
    }

    fn stop_times(&self) -> &Self::StopTimes {
        &self.stop_times
    }

    fn stops(&self) -> &Self::Stops {
        &self.stops
    }

    fn calendar(&self) -> &Self::Calendar {
        &self.calendar
    }

    fn shapes(&self) -> &Self::Shapes {
        &self.shapes
    }
}
