//! Transit schedule queries.
//!
//! Answers time-of-day and location questions about a public transit
//! schedule: which trip of a route is running now, which trips run just
//! before and after a given one, which stop comes next, which days a service
//! runs, and which stop is nearest a coordinate.
//!
//! Schedule data is read through the [`store::DocumentStore`] trait, so the
//! same queries run against in-memory snapshots, cached stores, or any other
//! key-ordered backend.

pub mod domain;
pub mod query;
pub mod store;
