//! Remapped point-lookup view
//!
//! Answers lookups for the repartitioned table without storing anything:
//! the parent table is queried under the original key and the mapper is
//! applied to whatever it returns.

use regroup_core::{
    KTableValueGetter, KTableValueGetterSupplier, KeyValue, KeyValueMapper, RecordContext,
    StreamsError, StreamsResult, ValueAndTimestamp,
};
use std::fmt;
use std::sync::Arc;

/// Lifecycle of a [`MapValueGetter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetterState {
    /// Built, not yet initialized
    Created,

    /// Ready for lookups
    Initialized,

    /// Parent released
    Closed,
}

/// Value getter that maps parent values through the key-selecting mapper
pub struct MapValueGetter<K, V, K1, V1> {
    mapper: Arc<dyn KeyValueMapper<K, V, K1, V1>>,
    parent: Box<dyn KTableValueGetter<K, V>>,
    state: GetterState,
}

impl<K, V, K1, V1> MapValueGetter<K, V, K1, V1> {
    /// Wrap a parent getter
    #[inline]
    #[must_use]
    pub fn new(
        mapper: Arc<dyn KeyValueMapper<K, V, K1, V1>>,
        parent: Box<dyn KTableValueGetter<K, V>>,
    ) -> Self {
        Self {
            mapper,
            parent,
            state: GetterState::Created,
        }
    }

    /// Current lifecycle state
    #[inline]
    #[must_use]
    pub fn state(&self) -> GetterState {
        self.state
    }

    fn ensure_initialized(&self) -> StreamsResult<()> {
        match self.state {
            GetterState::Initialized => Ok(()),
            GetterState::Created => Err(StreamsError::illegal_state(
                "value getter used before init",
            )),
            GetterState::Closed => Err(StreamsError::illegal_state(
                "value getter used after close",
            )),
        }
    }

    /// Parent timestamp when the parent has a value, otherwise the timestamp
    /// of the record currently being processed.
    fn map_value(
        &self,
        key: &K,
        parent: Option<ValueAndTimestamp<V>>,
        context: &dyn RecordContext,
    ) -> Option<ValueAndTimestamp<KeyValue<K1, V1>>> {
        let timestamp = parent
            .as_ref()
            .map_or_else(|| context.timestamp(), |vt| vt.timestamp);
        let mapped = self
            .mapper
            .apply(key, ValueAndTimestamp::value_or_none(parent.as_ref()));
        ValueAndTimestamp::make(mapped, timestamp)
    }
}

impl<K, V, K1, V1> KTableValueGetter<K, KeyValue<K1, V1>> for MapValueGetter<K, V, K1, V1> {
    fn init(&mut self, context: &dyn RecordContext) -> StreamsResult<()> {
        if self.state == GetterState::Closed {
            return Err(StreamsError::illegal_state(
                "value getter cannot be reinitialized after close",
            ));
        }
        self.parent.init(context)?;
        self.state = GetterState::Initialized;
        Ok(())
    }

    fn get(
        &self,
        key: &K,
        context: &dyn RecordContext,
    ) -> StreamsResult<Option<ValueAndTimestamp<KeyValue<K1, V1>>>> {
        self.ensure_initialized()?;
        let parent = self.parent.get(key, context)?;
        Ok(self.map_value(key, parent, context))
    }

    fn get_as_of(
        &self,
        key: &K,
        as_of_timestamp: i64,
        context: &dyn RecordContext,
    ) -> StreamsResult<Option<ValueAndTimestamp<KeyValue<K1, V1>>>> {
        self.ensure_initialized()?;
        let parent = self.parent.get_as_of(key, as_of_timestamp, context)?;
        Ok(self.map_value(key, parent, context))
    }

    fn is_versioned(&self) -> bool {
        self.parent.is_versioned()
    }

    fn close(&mut self) {
        if self.state != GetterState::Closed {
            self.parent.close();
            self.state = GetterState::Closed;
        }
    }
}

impl<K, V, K1, V1> fmt::Debug for MapValueGetter<K, V, K1, V1> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapValueGetter")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Builds [`MapValueGetter`]s over fresh parent getters
///
/// Store identity is never exposed: after remapping no single physical store
/// holds the new key space.
pub struct MapValueGetterSupplier<K, V, K1, V1> {
    mapper: Arc<dyn KeyValueMapper<K, V, K1, V1>>,
    parent: Arc<dyn KTableValueGetterSupplier<K, V>>,
}

impl<K, V, K1, V1> MapValueGetterSupplier<K, V, K1, V1> {
    /// Create supplier over the parent table's supplier
    #[inline]
    #[must_use]
    pub fn new(
        mapper: Arc<dyn KeyValueMapper<K, V, K1, V1>>,
        parent: Arc<dyn KTableValueGetterSupplier<K, V>>,
    ) -> Self {
        Self { mapper, parent }
    }
}

impl<K, V, K1, V1> KTableValueGetterSupplier<K, KeyValue<K1, V1>>
    for MapValueGetterSupplier<K, V, K1, V1>
where
    K: 'static,
    V: 'static,
    K1: 'static,
    V1: 'static,
{
    fn get(&self) -> Box<dyn KTableValueGetter<K, KeyValue<K1, V1>>> {
        Box::new(MapValueGetter::new(Arc::clone(&self.mapper), self.parent.get()))
    }

    fn store_names(&self) -> StreamsResult<Vec<String>> {
        Err(StreamsError::StoreNotAccessible)
    }
}

impl<K, V, K1, V1> fmt::Debug for MapValueGetterSupplier<K, V, K1, V1> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapValueGetterSupplier").finish_non_exhaustive()
    }
}
