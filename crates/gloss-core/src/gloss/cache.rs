use std::collections::{HashMap, VecDeque};

use super::lookup::LookupEntry;

/// Case-fold and trim a query into its cache key.
pub fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Bounded cache of remote lookup payloads with insertion-order eviction.
///
/// Reads never change eviction order. Re-inserting a present key replaces
/// its payload in place.
#[derive(Debug)]
pub struct TranslationCache {
    capacity: usize,
    entries: HashMap<String, Vec<LookupEntry>>,
    order: VecDeque<String>,
}

impl TranslationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn get(&self, query: &str) -> Option<&[LookupEntry]> {
        self.entries.get(&cache_key(query)).map(Vec::as_slice)
    }

    pub fn put(&mut self, query: &str, payload: Vec<LookupEntry>) {
        if self.capacity == 0 {
            return;
        }
        let key = cache_key(query);
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = payload;
            return;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, payload);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testutil::entry;

    fn payload(word: &str) -> Vec<LookupEntry> {
        vec![entry(word, &[&["test"]], false)]
    }

    #[test]
    fn test_get_put() {
        let mut cache = TranslationCache::new(4);
        assert!(cache.get("neko").is_none());
        cache.put("neko", payload("猫"));
        assert_eq!(cache.get("neko").unwrap()[0].japanese[0].word.as_deref(), Some("猫"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_normalization() {
        let mut cache = TranslationCache::new(4);
        cache.put("  NEKO ", payload("猫"));
        assert!(cache.get("neko").is_some());
        assert!(cache.get("Neko").is_some());
    }

    #[test]
    fn test_evicts_earliest_inserted() {
        let mut cache = TranslationCache::new(2);
        cache.put("a", payload("a"));
        cache.put("b", payload("b"));
        // reading "a" does not refresh it
        assert!(cache.get("a").is_some());
        cache.put("c", payload("c"));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_put_existing_replaces_in_place() {
        let mut cache = TranslationCache::new(2);
        cache.put("a", payload("a1"));
        cache.put("b", payload("b"));
        cache.put("A", payload("a2"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a").unwrap()[0].japanese[0].word.as_deref(), Some("a2"));
        // "a" keeps its original position and is still evicted first
        cache.put("c", payload("c"));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = TranslationCache::new(0);
        cache.put("a", payload("a"));
        assert!(cache.is_empty());
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(
            capacity in 1usize..8,
            keys in prop::collection::vec("[a-e]{1,2}", 0..40),
        ) {
            let mut cache = TranslationCache::new(capacity);
            for key in &keys {
                cache.put(key, payload(key));
                prop_assert!(cache.len() <= capacity);
                prop_assert!(cache.get(key).is_some());
            }
        }

        #[test]
        fn evicts_in_insertion_order(capacity in 1usize..6, extra in 1usize..6) {
            let mut cache = TranslationCache::new(capacity);
            let keys: Vec<String> = (0..capacity + extra).map(|i| format!("k{i}")).collect();
            for key in &keys {
                cache.put(key, payload(key));
            }
            for (i, key) in keys.iter().enumerate() {
                prop_assert_eq!(cache.get(key).is_some(), i >= extra);
            }
        }
    }
}
