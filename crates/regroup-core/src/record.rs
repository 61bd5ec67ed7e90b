//! Records flowing between table processors
//!
//! A [`Record`] carries a key, a value, an event timestamp and [`Headers`].
//! Processors rewrite key and value; timestamp and headers pass through.

/// Ordered record headers
///
/// Duplicate names are allowed; lookups return the most recent entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Headers {
    entries: Vec<(String, Vec<u8>)>,
}

impl Headers {
    /// Create empty headers
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append header
    #[inline]
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Append header (builder form)
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.add(name, value);
        self
    }

    /// Most recently added value for `name`
    #[must_use]
    pub fn last_value(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterate headers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Number of headers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No headers present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keyed record with timestamp and headers
///
/// The key is optional because upstream tables may emit records without one;
/// consumers that require a key must check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<K, V> {
    /// Record key
    pub key: Option<K>,

    /// Record value
    pub value: V,

    /// Event timestamp (milliseconds)
    pub timestamp: i64,

    /// Record headers
    pub headers: Headers,
}

impl<K, V> Record<K, V> {
    /// Create keyed record with empty headers
    #[inline]
    #[must_use]
    pub fn new(key: K, value: V, timestamp: i64) -> Self {
        Self {
            key: Some(key),
            value,
            timestamp,
            headers: Headers::new(),
        }
    }

    /// Create record without a key
    #[inline]
    #[must_use]
    pub fn unkeyed(value: V, timestamp: i64) -> Self {
        Self {
            key: None,
            value,
            timestamp,
            headers: Headers::new(),
        }
    }

    /// Replace key, keeping value, timestamp and headers
    #[inline]
    #[must_use]
    pub fn with_key<K1>(self, key: K1) -> Record<K1, V> {
        Record {
            key: Some(key),
            value: self.value,
            timestamp: self.timestamp,
            headers: self.headers,
        }
    }

    /// Replace value, keeping key, timestamp and headers
    #[inline]
    #[must_use]
    pub fn with_value<V1>(self, value: V1) -> Record<K, V1> {
        Record {
            key: self.key,
            value,
            timestamp: self.timestamp,
            headers: self.headers,
        }
    }

    /// Replace timestamp
    #[inline]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Replace headers
    #[inline]
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_key_and_value_preserve_metadata() {
        let headers = Headers::new().with("trace", b"abc".to_vec());
        let record = Record::new("a", 1, 42).with_headers(headers.clone());

        let rekeyed = record.with_key(7u32).with_value("v");

        assert_eq!(rekeyed.key, Some(7));
        assert_eq!(rekeyed.value, "v");
        assert_eq!(rekeyed.timestamp, 42);
        assert_eq!(rekeyed.headers, headers);
    }

    #[test]
    fn unkeyed_record_has_no_key() {
        let record: Record<&str, i32> = Record::unkeyed(1, 0);
        assert!(record.key.is_none());
    }

    #[test]
    fn headers_last_value_wins() {
        let mut headers = Headers::new();
        headers.add("h", b"1".to_vec());
        headers.add("other", b"x".to_vec());
        headers.add("h", b"2".to_vec());

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.last_value("h"), Some(&b"2"[..]));
        assert_eq!(headers.last_value("missing"), None);

        let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["h", "other", "h"]);
    }
}
