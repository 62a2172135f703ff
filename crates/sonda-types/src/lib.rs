//! Platform-agnostic types and pure computation for the sonda dashboard client.
//!
//! This crate holds the data model shared by every other sonda crate plus the
//! pure transformation functions that views and exporters are built on:
//!
//! - **Wire records** ([`SensorReading`], [`LedState`], [`LedHistoryEntry`],
//!   [`Event`], ...) deserialized from the REST backend. The backend speaks
//!   Spanish field names (`fecha`, `valor`, `estado`, ...); the structs here
//!   map them to English fields via serde renames.
//! - **Aggregation** ([`stats`]): summary statistics, distance-range
//!   histograms, and insertion-ordered categorical tallies.
//! - **Filtering** ([`filter`]): inclusive date-range selection over any
//!   timestamped record.
//!
//! Nothing in this crate performs I/O; everything is synchronous and
//! deterministic, which is what makes the derived datasets easy to test.

pub mod filter;
pub mod stats;
pub mod types;

pub use filter::{Dated, filter_by_date_range};
pub use stats::{
    Bucket, DISTANCE_BUCKETS, LedActivity, bucketize, compute_statistics, group_count_by,
    led_activity, recent_series,
};
pub use types::{
    ButtonHistoryEntry, ButtonState, Event, LedHistoryEntry, LedState, SensorReading, Source,
    Statistics, User, display_timestamp, parse_timestamp,
};
