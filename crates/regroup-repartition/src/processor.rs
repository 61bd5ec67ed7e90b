//! Repartition record processor
//!
//! Turns one changelog record of the source table into the records a grouped
//! aggregation needs under the selected key:
//!
//! ```text
//! (k, old -> new) ──mapper──▶ old' = (k1, v1), new' = (k2, v2)
//!
//!   k1 == k2, merge mode  ──▶ (k1, v1 -> v2)
//!   otherwise             ──▶ (k1, v1 -> _)  then  (k2, _ -> v2)
//! ```
//!
//! The removal is always forwarded before the addition so the aggregator
//! subtracts the old contribution before adding the new one.

use crate::upgrade::merge_mode_enabled;
use regroup_core::{
    Change, KeyValue, KeyValueMapper, ProcessorContext, Record, StreamsError, StreamsResult,
};
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Records produced for one input record, in forwarding order
pub type Repartitioned<K1, V1> = SmallVec<[Record<K1, Change<V1>>; 2]>;

/// Processor that re-keys table changes for a downstream aggregation
///
/// # Invariants
/// - Emits 0, 1 or 2 records per input
/// - A removal is emitted before an addition
/// - The only retained state is the merge flag fixed by [`Self::init`]
pub struct RepartitionMapProcessor<K, V, K1, V1> {
    mapper: Arc<dyn KeyValueMapper<K, V, K1, V1>>,
    merge_mode: bool,
}

impl<K, V, K1, V1> RepartitionMapProcessor<K, V, K1, V1>
where
    K1: Eq + Hash,
{
    /// Create processor over a shared mapper
    ///
    /// Merge mode is enabled until [`Self::init`] reads the configuration.
    #[inline]
    #[must_use]
    pub fn new(mapper: Arc<dyn KeyValueMapper<K, V, K1, V1>>) -> Self {
        Self {
            mapper,
            merge_mode: true,
        }
    }

    /// Resolve merge mode from the application configuration
    pub fn init<C>(&mut self, context: &C)
    where
        C: ProcessorContext<K1, Change<V1>> + ?Sized,
    {
        let config = context.app_configs();
        self.merge_mode = merge_mode_enabled(config);
        tracing::debug!(
            merge_mode = self.merge_mode,
            upgrade_from = config.upgrade_from().unwrap_or("<none>"),
            "initialized repartition map processor"
        );
    }

    /// Whether same-key updates are combined into one record
    #[inline]
    #[must_use]
    pub fn merge_mode_enabled(&self) -> bool {
        self.merge_mode
    }

    /// Compute the records to forward for `record`
    ///
    /// Pure with respect to the processor: identical inputs yield identical
    /// outputs. Timestamp and headers of `record` are copied to every output.
    ///
    /// # Errors
    /// Returns [`StreamsError::NullGroupingKey`] if `record` has no key
    pub fn repartition(&self, record: Record<K, Change<V>>) -> StreamsResult<Repartitioned<K1, V1>> {
        let Some(key) = record.key.as_ref() else {
            return Err(StreamsError::NullGroupingKey);
        };

        let new_pair = self.select(key, record.value.new_value.as_ref());
        let old_pair = self.select(key, record.value.old_value.as_ref());

        let Record {
            timestamp, headers, ..
        } = record;
        let mut out = Repartitioned::new();

        match (old_pair, new_pair) {
            (Some((old_key, old_value)), Some((new_key, new_value)))
                if self.merge_mode && old_key == new_key =>
            {
                out.push(Record {
                    key: Some(old_key),
                    value: Change::update(old_value, new_value),
                    timestamp,
                    headers,
                });
            }
            (old_pair, new_pair) => {
                if let Some((old_key, old_value)) = old_pair {
                    out.push(Record {
                        key: Some(old_key),
                        value: Change::delete(old_value),
                        timestamp,
                        headers: headers.clone(),
                    });
                }
                if let Some((new_key, new_value)) = new_pair {
                    out.push(Record {
                        key: Some(new_key),
                        value: Change::insert(new_value),
                        timestamp,
                        headers,
                    });
                }
            }
        }

        Ok(out)
    }

    /// Repartition `record` and forward the results in order
    ///
    /// Nothing is forwarded when the record is rejected.
    ///
    /// # Errors
    /// Returns [`StreamsError::NullGroupingKey`] if `record` has no key
    pub fn process<C>(&self, record: Record<K, Change<V>>, context: &mut C) -> StreamsResult<()>
    where
        C: ProcessorContext<K1, Change<V1>> + ?Sized,
    {
        for out in self.repartition(record)? {
            tracing::trace!(
                timestamp = out.timestamp,
                old = out.value.old_value.is_some(),
                new = out.value.new_value.is_some(),
                "forwarding repartitioned record"
            );
            context.forward(out);
        }
        Ok(())
    }

    fn select(&self, key: &K, value: Option<&V>) -> Option<(K1, V1)> {
        let value = value?;
        let pair = self.mapper.apply(key, Some(value)).and_then(KeyValue::into_valid);
        if pair.is_none() {
            tracing::trace!("mapper suppressed one side of the change");
        }
        pair
    }
}

impl<K, V, K1, V1> fmt::Debug for RepartitionMapProcessor<K, V, K1, V1> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepartitionMapProcessor")
            .field("merge_mode", &self.merge_mode)
            .finish_non_exhaustive()
    }
}
