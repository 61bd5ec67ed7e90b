//! Regroup Core
//!
//! Shared vocabulary for table processors that rewrite keys ahead of a
//! grouped aggregation.
//!
//! # Core Concepts
//!
//! - [`Change`]: before/after values of one changelog row
//! - [`KeyValue`]: key-selecting mapper output
//! - [`Record`]: keyed, timestamped record with [`Headers`]
//! - [`ValueAndTimestamp`]: point-lookup result
//! - [`KeyValueMapper`]: pure `(key, value) -> (key', value')` capability
//! - [`ProcessorContext`] / [`RecordContext`]: per-call runtime context
//! - [`KTableValueGetter`] / [`KTableValueGetterSupplier`]: point lookups
//! - [`StreamsConfig`] / [`UpgradeFrom`]: configuration
//! - [`StreamsError`]: error taxonomy

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod change;
pub mod config;
pub mod context;
pub mod error;
pub mod getter;
pub mod mapper;
pub mod record;
pub mod value;

// Re-exports
pub use change::{Change, KeyValue};
pub use config::{StreamsConfig, UpgradeFrom, UPGRADE_FROM_CONFIG};
pub use context::{ProcessorContext, RecordContext};
pub use error::{StreamsError, StreamsResult};
pub use getter::{KTableValueGetter, KTableValueGetterSupplier};
pub use mapper::KeyValueMapper;
pub use record::{Headers, Record};
pub use value::ValueAndTimestamp;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
