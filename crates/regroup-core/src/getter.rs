//! Point-lookup interface over table state
//!
//! Downstream joins and aggregations read the current (or historical) value
//! of a key through a [`KTableValueGetter`] built by a
//! [`KTableValueGetterSupplier`].

use crate::context::RecordContext;
use crate::error::{StreamsError, StreamsResult};
use crate::value::ValueAndTimestamp;

/// Point lookup of table values
///
/// # Lifecycle
/// `init` once, any number of lookups, then `close`. Lookups outside that
/// window may be rejected.
pub trait KTableValueGetter<K, V>: Send {
    /// Prepare for lookups
    ///
    /// # Errors
    /// Returns error if the getter cannot be initialized
    fn init(&mut self, context: &dyn RecordContext) -> StreamsResult<()>;

    /// Current value for `key`
    ///
    /// `context` describes the record being processed when the lookup is made.
    ///
    /// # Errors
    /// Returns error if the lookup fails
    fn get(
        &self,
        key: &K,
        context: &dyn RecordContext,
    ) -> StreamsResult<Option<ValueAndTimestamp<V>>>;

    /// Latest value for `key` with timestamp at or before `as_of_timestamp`
    ///
    /// # Errors
    /// Non-versioned getters return [`StreamsError::UnsupportedOperation`]
    fn get_as_of(
        &self,
        key: &K,
        as_of_timestamp: i64,
        context: &dyn RecordContext,
    ) -> StreamsResult<Option<ValueAndTimestamp<V>>> {
        let _ = (key, as_of_timestamp, context);
        Err(StreamsError::unsupported(
            "get with timestamp is only supported for versioned stores",
        ))
    }

    /// Whether historical lookups are supported
    #[inline]
    fn is_versioned(&self) -> bool {
        false
    }

    /// Release underlying resources
    fn close(&mut self);
}

/// Factory for value getters over one table
pub trait KTableValueGetterSupplier<K, V>: Send + Sync {
    /// Build a fresh getter
    fn get(&self) -> Box<dyn KTableValueGetter<K, V>>;

    /// Names of the state stores backing this table
    ///
    /// # Errors
    /// Returns [`StreamsError::StoreNotAccessible`] when no physical store
    /// corresponds to the table's key space
    fn store_names(&self) -> StreamsResult<Vec<String>>;
}
