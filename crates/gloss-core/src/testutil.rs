#![cfg(test)]

use std::collections::HashMap;
use std::sync::Mutex;

use crate::gloss::{JapaneseForm, Lookup, LookupEntry, LookupResponse, Sense};

/// Lookup entry with one written form and the given senses (each sense a
/// list of definitions, all tagged as nouns).
pub(crate) fn entry(word: &str, senses: &[&[&str]], is_common: bool) -> LookupEntry {
    LookupEntry {
        japanese: vec![JapaneseForm {
            reading: Some(word.to_string()),
            word: Some(word.to_string()),
        }],
        senses: senses
            .iter()
            .map(|defs| Sense {
                english_definitions: defs.iter().map(|d| d.to_string()).collect(),
                parts_of_speech: vec!["Noun".to_string()],
            })
            .collect(),
        is_common,
        jlpt: Vec::new(),
    }
}

/// Scripted lookup: answers from a fixed table, fails for anything else,
/// and records every query it receives.
#[derive(Default)]
pub(crate) struct MockLookup {
    responses: HashMap<String, LookupResponse>,
    calls: Mutex<Vec<String>>,
}

impl MockLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, query: &str, response: LookupResponse) -> Self {
        self.responses.insert(query.to_string(), response);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Lookup for MockLookup {
    fn lookup(&self, query: &str) -> LookupResponse {
        self.calls.lock().unwrap().push(query.to_string());
        self.responses
            .get(query)
            .cloned()
            .unwrap_or_else(|| LookupResponse::failure("HTTP 404"))
    }
}
