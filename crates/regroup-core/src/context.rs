//! Per-call processing context seams
//!
//! The runtime hosting a processor hands it a context on every call instead of
//! exposing ambient state. Tests substitute recording implementations.

use crate::config::StreamsConfig;
use crate::record::Record;

/// Metadata of the record currently being processed
pub trait RecordContext {
    /// Timestamp of the current record (milliseconds)
    fn timestamp(&self) -> i64;
}

/// Context passed to a table processor
///
/// `K` and `V` are the processor's output key and value types.
pub trait ProcessorContext<K, V>: RecordContext {
    /// Application configuration
    fn app_configs(&self) -> &StreamsConfig;

    /// Send a record to all downstream processors
    fn forward(&mut self, record: Record<K, V>);
}
