//! Repartition map wiring
//!
//! [`KTableRepartitionMap`] is the node a grouped table installs between its
//! source table and the repartition topic. It hands out processors for the
//! record path and a getter supplier for the lookup path, both sharing one
//! mapper.

use crate::processor::RepartitionMapProcessor;
use crate::view::MapValueGetterSupplier;
use regroup_core::{KTableValueGetterSupplier, KeyValueMapper, StreamsError, StreamsResult};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Key-selecting map from a source table to a grouped table
///
/// Only used by keyed aggregations; the processor always needs both the old
/// and the new value of every change.
pub struct KTableRepartitionMap<K, V, K1, V1> {
    parent: Arc<dyn KTableValueGetterSupplier<K, V>>,
    mapper: Arc<dyn KeyValueMapper<K, V, K1, V1>>,
}

impl<K, V, K1, V1> KTableRepartitionMap<K, V, K1, V1>
where
    K1: Eq + Hash,
{
    /// Create map over the source table's getter supplier
    #[must_use]
    pub fn new<M>(parent: Arc<dyn KTableValueGetterSupplier<K, V>>, mapper: M) -> Self
    where
        M: KeyValueMapper<K, V, K1, V1> + 'static,
    {
        Self {
            parent,
            mapper: Arc::new(mapper),
        }
    }

    /// Build a processor for one partition
    #[inline]
    #[must_use]
    pub fn processor(&self) -> RepartitionMapProcessor<K, V, K1, V1> {
        RepartitionMapProcessor::new(Arc::clone(&self.mapper))
    }

    /// Build the lookup view of the remapped table
    #[inline]
    #[must_use]
    pub fn view(&self) -> MapValueGetterSupplier<K, V, K1, V1> {
        MapValueGetterSupplier::new(Arc::clone(&self.mapper), Arc::clone(&self.parent))
    }

    /// Request that old values not be sent
    ///
    /// # Errors
    /// Always returns [`StreamsError::IllegalState`]: merging and splitting
    /// both depend on the old value of every change.
    pub fn enable_sending_old_values(&self, force_materialization: bool) -> StreamsResult<bool> {
        tracing::debug!(
            force_materialization,
            "attempted to toggle old-value propagation on a repartition map"
        );
        Err(StreamsError::illegal_state(
            "repartition map should always require sending old values",
        ))
    }
}

impl<K, V, K1, V1> fmt::Debug for KTableRepartitionMap<K, V, K1, V1> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KTableRepartitionMap").finish_non_exhaustive()
    }
}
