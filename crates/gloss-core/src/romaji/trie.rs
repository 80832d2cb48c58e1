use std::collections::HashMap;

use super::config::RomajiTable;

struct Node<V> {
    children: HashMap<u8, Node<V>>,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// Byte-level trie keyed by ASCII romaji.
///
/// Used both for the romaji → kana table (`V = String`) and for the word /
/// particle index of the lexicon. Non-ASCII input simply never matches.
pub struct RomajiTrie<V = String> {
    root: Node<V>,
    len: usize,
}

impl<V> Default for RomajiTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RomajiTrie<V> {
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Insert `key`, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: V) {
        let mut node = &mut self.root;
        for &b in key.as_bytes() {
            node = node.children.entry(b).or_insert_with(Node::new);
        }
        if node.value.replace(value).is_none() {
            self.len += 1;
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let mut node = &self.root;
        for &b in key.as_bytes() {
            node = node.children.get(&b)?;
        }
        node.value.as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All keys that are a prefix of `query`, shortest first, as
    /// `(byte length, value)` pairs.
    pub fn common_prefix_search(&self, query: &str) -> Vec<(usize, &V)> {
        let mut found = Vec::new();
        let mut node = &self.root;
        for (i, b) in query.bytes().enumerate() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(v) = &node.value {
                found.push((i + 1, v));
            }
        }
        found
    }

    /// True when at least one key is a prefix of `query`.
    pub fn has_prefix_of(&self, query: &str) -> bool {
        let mut node = &self.root;
        for b in query.bytes() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => return false,
            }
            if node.value.is_some() {
                return true;
            }
        }
        false
    }
}

impl RomajiTrie<String> {
    pub fn from_table(table: &RomajiTable) -> Self {
        let mut trie = Self::new();
        for (romaji, kana) in &table.mappings {
            trie.insert(romaji, kana.clone());
        }
        trie
    }

    /// Longest mapping that prefixes `input` and is at most `max_len` bytes.
    pub fn longest_match(&self, input: &str, max_len: usize) -> Option<(usize, &str)> {
        self.common_prefix_search(input)
            .into_iter()
            .rev()
            .find(|&(len, _)| len <= max_len)
            .map(|(len, kana)| (len, kana.as_str()))
    }
}
