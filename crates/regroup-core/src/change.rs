//! Changelog deltas and mapped key-value pairs
//!
//! Provides [`Change`] for the before/after view of a table row and
//! [`KeyValue`] for the output of a key-selecting mapper.

/// Before/after values for one key of a changelog
///
/// # Invariants
/// - `old_value: None` denotes an insertion
/// - `new_value: None` denotes a deletion
/// - both present denotes an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Change<V> {
    /// Value before the change
    pub old_value: Option<V>,

    /// Value after the change
    pub new_value: Option<V>,
}

impl<V> Change<V> {
    /// Create change from both sides
    #[inline]
    #[must_use]
    pub fn new(old_value: Option<V>, new_value: Option<V>) -> Self {
        Self {
            old_value,
            new_value,
        }
    }

    /// Pure addition
    #[inline]
    #[must_use]
    pub fn insert(new_value: V) -> Self {
        Self::new(None, Some(new_value))
    }

    /// Pure removal
    #[inline]
    #[must_use]
    pub fn delete(old_value: V) -> Self {
        Self::new(Some(old_value), None)
    }

    /// Replacement of `old_value` by `new_value`
    #[inline]
    #[must_use]
    pub fn update(old_value: V, new_value: V) -> Self {
        Self::new(Some(old_value), Some(new_value))
    }

    /// Only the new side is present
    #[inline]
    #[must_use]
    pub fn is_insert(&self) -> bool {
        self.old_value.is_none() && self.new_value.is_some()
    }

    /// Only the old side is present
    #[inline]
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.old_value.is_some() && self.new_value.is_none()
    }

    /// Both sides are present
    #[inline]
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.old_value.is_some() && self.new_value.is_some()
    }

    /// Neither side is present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.old_value.is_none() && self.new_value.is_none()
    }

    /// Borrow both sides
    #[inline]
    #[must_use]
    pub fn as_ref(&self) -> Change<&V> {
        Change::new(self.old_value.as_ref(), self.new_value.as_ref())
    }
}

/// Key-value pair produced by a key-selecting mapper
///
/// Either side may be absent; an absent side suppresses the pair downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyValue<K, V> {
    /// Selected key
    pub key: Option<K>,

    /// Selected value
    pub value: Option<V>,
}

impl<K, V> KeyValue<K, V> {
    /// Create pair with optional sides
    #[inline]
    #[must_use]
    pub fn new(key: Option<K>, value: Option<V>) -> Self {
        Self { key, value }
    }

    /// Create pair with both sides present
    #[inline]
    #[must_use]
    pub fn pair(key: K, value: V) -> Self {
        Self::new(Some(key), Some(value))
    }

    /// Both key and value are present
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.key.is_some() && self.value.is_some()
    }

    /// Split into `(key, value)` when both sides are present
    #[inline]
    #[must_use]
    pub fn into_valid(self) -> Option<(K, V)> {
        match (self.key, self.value) {
            (Some(key), Some(value)) => Some((key, value)),
            _ => None,
        }
    }
}

impl<K, V> From<(K, V)> for KeyValue<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::pair(key, value)
    }
}
