//! Testing utilities for the regroup workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use parking_lot::Mutex;
use regroup_core::{
    KTableValueGetter, KTableValueGetterSupplier, KeyValue, ProcessorContext, Record,
    RecordContext, StreamsConfig, StreamsError, StreamsResult, ValueAndTimestamp,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Install a fmt subscriber honoring `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Record context with a fixed timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimestamp(pub i64);

impl RecordContext for FixedTimestamp {
    fn timestamp(&self) -> i64 {
        self.0
    }
}

/// Processor context that keeps everything forwarded to it
#[derive(Debug)]
pub struct RecordingContext<K, V> {
    pub config: StreamsConfig,
    pub timestamp: i64,
    pub forwarded: Vec<Record<K, V>>,
}

impl<K, V> RecordingContext<K, V> {
    pub fn new() -> Self {
        Self::with_config(StreamsConfig::new())
    }

    pub fn with_config(config: StreamsConfig) -> Self {
        Self {
            config,
            timestamp: 0,
            forwarded: Vec::new(),
        }
    }

    pub fn upgrading_from(marker: &str) -> Self {
        Self::with_config(StreamsConfig::new().with_upgrade_from(marker))
    }

    pub fn take_forwarded(&mut self) -> Vec<Record<K, V>> {
        std::mem::take(&mut self.forwarded)
    }
}

impl<K, V> Default for RecordingContext<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecordContext for RecordingContext<K, V> {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl<K, V> ProcessorContext<K, V> for RecordingContext<K, V> {
    fn app_configs(&self) -> &StreamsConfig {
        &self.config
    }

    fn forward(&mut self, record: Record<K, V>) {
        self.forwarded.push(record);
    }
}

/// `(k, v) -> (v, k)`: groups rows by their value, keeping the original key.
pub fn swap(key: &String, value: Option<&String>) -> Option<KeyValue<String, String>> {
    value.map(|v| KeyValue::pair(v.clone(), key.clone()))
}

#[derive(Debug)]
struct TableState<K, V> {
    // Per key, writes in timestamp order; `None` is a tombstone.
    rows: BTreeMap<K, Vec<(i64, Option<V>)>>,
    fail_lookups: bool,
}

/// In-memory source table exposing value getters
///
/// Cloning shares the underlying rows and counters.
#[derive(Debug)]
pub struct InMemoryTable<K, V> {
    name: String,
    versioned: bool,
    state: Arc<Mutex<TableState<K, V>>>,
    inits: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl<K, V> Clone for InMemoryTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            versioned: self.versioned,
            state: Arc::clone(&self.state),
            inits: Arc::clone(&self.inits),
            closes: Arc::clone(&self.closes),
        }
    }
}

impl<K: Ord, V> InMemoryTable<K, V> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            versioned: false,
            state: Arc::new(Mutex::new(TableState {
                rows: BTreeMap::new(),
                fail_lookups: false,
            })),
            inits: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn versioned(name: &str) -> Self {
        Self {
            versioned: true,
            ..Self::new(name)
        }
    }

    pub fn put(&self, key: K, value: V, timestamp: i64) {
        self.write(key, Some(value), timestamp);
    }

    pub fn delete(&self, key: K, timestamp: i64) {
        self.write(key, None, timestamp);
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.state.lock().fail_lookups = fail;
    }

    pub fn init_count(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn write(&self, key: K, value: Option<V>, timestamp: i64) {
        let mut state = self.state.lock();
        let history = state.rows.entry(key).or_default();
        let at = history.partition_point(|(ts, _)| *ts <= timestamp);
        history.insert(at, (timestamp, value));
    }
}

impl<K, V> KTableValueGetterSupplier<K, V> for InMemoryTable<K, V>
where
    K: Ord + Send + 'static,
    V: Clone + Send + 'static,
{
    fn get(&self) -> Box<dyn KTableValueGetter<K, V>> {
        Box::new(InMemoryGetter {
            table: self.clone(),
        })
    }

    fn store_names(&self) -> StreamsResult<Vec<String>> {
        Ok(vec![self.name.clone()])
    }
}

struct InMemoryGetter<K, V> {
    table: InMemoryTable<K, V>,
}

impl<K: Ord, V: Clone> InMemoryGetter<K, V> {
    fn lookup(&self, key: &K, as_of: i64) -> StreamsResult<Option<ValueAndTimestamp<V>>> {
        let state = self.table.state.lock();
        if state.fail_lookups {
            return Err(StreamsError::lookup(format!("store {} unavailable", self.table.name)));
        }
        let latest = state
            .rows
            .get(key)
            .and_then(|history| history.iter().rev().find(|(ts, _)| *ts <= as_of));
        Ok(latest.and_then(|(ts, v)| ValueAndTimestamp::make(v.clone(), *ts)))
    }
}

impl<K, V> KTableValueGetter<K, V> for InMemoryGetter<K, V>
where
    K: Ord + Send,
    V: Clone + Send,
{
    fn init(&mut self, _context: &dyn RecordContext) -> StreamsResult<()> {
        self.table.inits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get(
        &self,
        key: &K,
        _context: &dyn RecordContext,
    ) -> StreamsResult<Option<ValueAndTimestamp<V>>> {
        self.lookup(key, i64::MAX)
    }

    fn get_as_of(
        &self,
        key: &K,
        as_of_timestamp: i64,
        _context: &dyn RecordContext,
    ) -> StreamsResult<Option<ValueAndTimestamp<V>>> {
        if !self.table.versioned {
            return Err(StreamsError::unsupported(
                "get with timestamp is only supported for versioned stores",
            ));
        }
        self.lookup(key, as_of_timestamp)
    }

    fn is_versioned(&self) -> bool {
        self.table.versioned
    }

    fn close(&mut self) {
        self.table.closes.fetch_add(1, Ordering::SeqCst);
    }
}
