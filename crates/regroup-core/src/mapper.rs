//! Key-selecting mapper capability

use crate::change::KeyValue;

/// Maps an original `(key, value)` to a new key-value pair
///
/// Implementations must be pure: the same input always yields the same pair.
/// `value` is absent only for point lookups of keys with no current value.
/// Returning `None`, or a pair with an absent side, suppresses the output.
pub trait KeyValueMapper<K, V, K1, V1>: Send + Sync {
    /// Select the new key and value
    fn apply(&self, key: &K, value: Option<&V>) -> Option<KeyValue<K1, V1>>;
}

impl<K, V, K1, V1, F> KeyValueMapper<K, V, K1, V1> for F
where
    F: Fn(&K, Option<&V>) -> Option<KeyValue<K1, V1>> + Send + Sync,
{
    #[inline]
    fn apply(&self, key: &K, value: Option<&V>) -> Option<KeyValue<K1, V1>> {
        self(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_mapper() {
        let swap = |k: &&str, v: Option<&String>| v.map(|v| KeyValue::pair(v.clone(), k.to_string()));

        assert_eq!(
            swap.apply(&"a", Some(&"x".to_string())),
            Some(KeyValue::pair("x".to_string(), "a".to_string()))
        );
        assert_eq!(swap.apply(&"a", None), None);
    }
}
