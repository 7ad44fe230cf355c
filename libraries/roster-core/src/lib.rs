//! Roster Core
//!
//! Platform-agnostic types and data transforms for the Roster admin client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `UserRecord`, `UserFields`, `Gender`
//! - **Sorting**: `SortField`, `SortState` and the stable record ordering
//! - **Bucketing**: `BucketDomain` and the dense chart series
//! - **Error Handling**: `RosterError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use roster_core::{reshape, BucketDomain, BucketMap};
//!
//! let mut buckets = BucketMap::new();
//! buckets.insert("05".to_string(), 3);
//!
//! let series = reshape(&buckets, BucketDomain::Hours);
//! assert_eq!(series.len(), 24);
//! assert_eq!(series.counts[5], 3);
//! ```

#![forbid(unsafe_code)]

pub mod buckets;
pub mod error;
pub mod sort;
pub mod types;

pub use buckets::{axis_max, reshape, BucketDomain, BucketMap, DenseSeries};
pub use error::{Result, RosterError};
pub use sort::{sort_users, CompareKind, SortDirection, SortField, SortKey, SortState};
pub use types::{parse_created_at, Gender, UserFields, UserId, UserRecord, CREATED_AT_FORMAT};
