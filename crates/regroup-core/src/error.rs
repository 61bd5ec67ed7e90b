//! Error types for table repartitioning
//!
//! Provides [`StreamsError`] covering:
//! - Upstream contract violations (missing grouping key)
//! - Framework misuse (disabling old values, store identity queries)
//! - Parent lookup failures
//! - Configuration parsing

/// Table processing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamsError {
    /// Record reached a grouping stage without a key
    #[error("record key for the grouping table should not be null")]
    NullGroupingKey,

    /// Store identity requested for a remapped key space
    #[error("underlying state store not accessible due to repartitioning")]
    StoreNotAccessible,

    /// Caller broke a lifecycle or wiring contract
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Operation not offered by this component
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Parent lookup failed
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl StreamsError {
    /// Create illegal state error
    #[inline]
    #[must_use]
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Create unsupported operation error
    #[inline]
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// Create lookup error
    #[inline]
    #[must_use]
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup(message.into())
    }

    /// Check if error is a contract violation the runtime must not retry
    ///
    /// Lookup failures come from the parent source and are left to the
    /// runtime's retry policy.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Lookup(_))
    }
}

/// Result type alias for table processing
pub type StreamsResult<T> = Result<T, StreamsError>;
