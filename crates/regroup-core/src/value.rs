//! Timestamped values returned by point lookups

/// Value paired with the timestamp it was written at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueAndTimestamp<V> {
    /// Stored value
    pub value: V,

    /// Write timestamp (milliseconds)
    pub timestamp: i64,
}

impl<V> ValueAndTimestamp<V> {
    /// Create from present value
    #[inline]
    #[must_use]
    pub fn new(value: V, timestamp: i64) -> Self {
        Self { value, timestamp }
    }

    /// Create from optional value
    ///
    /// Returns `None` when `value` is absent; a timestamp alone is not a result.
    #[inline]
    #[must_use]
    pub fn make(value: Option<V>, timestamp: i64) -> Option<Self> {
        value.map(|value| Self::new(value, timestamp))
    }

    /// Borrow the value of an optional result
    #[inline]
    #[must_use]
    pub fn value_or_none(result: Option<&Self>) -> Option<&V> {
        result.map(|r| &r.value)
    }

    /// Split into value and timestamp
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (V, i64) {
        (self.value, self.timestamp)
    }
}
