//! Serialization cache - reuse identical share conversions.
//!
//! A pure content-addressed memo: the key is a hash of (headers, records),
//! the value the serialized CSV bytes. A hit returns byte-identical output,
//! so the cache has no semantic effect and is optional for correctness.

use once_cell::sync::Lazy;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::error::WriteResult;
use crate::models::Record;
use crate::writer::record_cell;

/// Process-wide cache instance.
pub static SHARE_CACHE: Lazy<SerializationCache> = Lazy::new(SerializationCache::new);

/// Content-addressed store of serialized shares.
pub struct SerializationCache {
    entries: Mutex<HashMap<u64, Vec<u8>>>,
}

impl SerializationCache {
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }

    /// Key for a share's content.
    ///
    /// Records hash through their cell values in merged-column order, so
    /// two shares with equal content always collide onto the same entry.
    pub fn content_key(headers: &[String], records: &[Record]) -> u64 {
        let mut hasher = DefaultHasher::new();
        headers.hash(&mut hasher);
        records.len().hash(&mut hasher);
        for record in records {
            for column in headers {
                record_cell(record, column).hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Return the cached bytes for `key`, or serialize and remember them.
    pub fn get_or_serialize<F>(&self, key: u64, serialize: F) -> WriteResult<Vec<u8>>
    where
        F: FnOnce() -> WriteResult<Vec<u8>>,
    {
        if let Ok(entries) = self.entries.lock() {
            if let Some(bytes) = entries.get(&key) {
                return Ok(bytes.clone());
            }
        }

        let bytes = serialize()?;

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, bytes.clone());
        }

        Ok(bytes)
    }

    /// Number of cached conversions.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached conversions.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Default for SerializationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::to_csv_bytes;
    use serde_json::json;

    fn record(name: &str) -> Record {
        let mut r = Record::new();
        r.insert("name".to_string(), json!(name));
        r
    }

    #[test]
    fn test_hit_returns_identical_bytes() {
        let cache = SerializationCache::new();
        let headers = vec!["name".to_string()];
        let records = vec![record("Alice")];
        let key = SerializationCache::content_key(&headers, &records);

        let first = cache
            .get_or_serialize(key, || to_csv_bytes(&headers, &records))
            .unwrap();
        let second = cache
            .get_or_serialize(key, || unreachable!("second lookup must hit"))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_equal_content_same_key() {
        let headers = vec!["name".to_string()];
        let a = SerializationCache::content_key(&headers, &[record("Alice")]);
        let b = SerializationCache::content_key(&headers, &[record("Alice")]);
        let c = SerializationCache::content_key(&headers, &[record("Bob")]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clear() {
        let cache = SerializationCache::new();
        let headers = vec!["name".to_string()];
        let key = SerializationCache::content_key(&headers, &[]);
        cache
            .get_or_serialize(key, || to_csv_bytes(&headers, &[]))
            .unwrap();

        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
