//! Regroup Repartition
//!
//! Re-keys table changes ahead of a grouped aggregation.
//!
//! # Components
//!
//! - [`merge_mode_enabled`]: rolling-upgrade compatibility switch
//! - [`RepartitionMapProcessor`]: per-record merge/split of re-keyed changes
//! - [`MapValueGetter`] / [`MapValueGetterSupplier`]: non-materialized lookup view
//! - [`KTableRepartitionMap`]: wiring of processor and view over one mapper
//!
//! # Example
//!
//! ```rust,ignore
//! use regroup_core::{Change, KeyValue, Record};
//! use regroup_repartition::KTableRepartitionMap;
//!
//! // Group users by region
//! let map = KTableRepartitionMap::new(users.getter_supplier(), |user: &UserId, u: Option<&User>| {
//!     u.map(|u| KeyValue::pair(u.region.clone(), user.clone()))
//! });
//!
//! let mut processor = map.processor();
//! processor.init(&ctx);
//! processor.process(Record::new(user, Change::update(before, after), ts), &mut ctx)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod processor;
mod supplier;
mod upgrade;
mod view;

// Re-exports
pub use processor::{RepartitionMapProcessor, Repartitioned};
pub use supplier::KTableRepartitionMap;
pub use upgrade::merge_mode_enabled;
pub use view::{GetterState, MapValueGetter, MapValueGetterSupplier};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
