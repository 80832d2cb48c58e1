//! Romaji → token segmentation.
//!
//! Input is normalized first ([`normalize_romaji`]). Text that still
//! contains a space is split on whitespace and each segment classified on
//! its own; anything else goes through dictionary segmentation.

mod segment;
mod spaced;


use serde::Serialize;
use tracing::{debug, debug_span};

use crate::lexicon::Lexicon;
use crate::romaji::normalize_romaji;

pub(crate) const CONF_SPACED_PARTICLE: f64 = 0.95;
pub(crate) const CONF_DICTIONARY: f64 = 0.9;
pub(crate) const CONF_CONVERTED: f64 = 0.7;
pub(crate) const CONF_UNKNOWN: f64 = 0.5;
pub(crate) const CONF_WHOLE_INPUT: f64 = 0.3;

/// A segment of the input with its transliteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub romaji: String,
    pub kana: String,
    pub is_particle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_role: Option<String>,
    pub confidence: f64,
}

impl Token {
    pub(crate) fn word(romaji: &str, kana: &str, confidence: f64) -> Self {
        Self {
            romaji: romaji.to_string(),
            kana: kana.to_string(),
            is_particle: false,
            particle_role: None,
            confidence,
        }
    }

    pub(crate) fn particle(romaji: &str, kana: &str, role: &str, confidence: f64) -> Self {
        Self {
            romaji: romaji.to_string(),
            kana: kana.to_string(),
            is_particle: true,
            particle_role: Some(role.to_string()),
            confidence,
        }
    }
}

/// Concatenated kana of a token sequence.
pub fn join_kana(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.kana.as_str()).collect()
}

/// Mean token confidence, 0 for an empty sequence.
pub fn average_confidence(tokens: &[Token]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    tokens.iter().map(|t| t.confidence).sum::<f64>() / tokens.len() as f64
}

/// Stateless tokenizer over a shared lexicon.
#[derive(Clone, Copy)]
pub struct Tokenizer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Tokenizer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Normalize and tokenize raw romaji.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let normalized = normalize_romaji(text);
        let _span = debug_span!("tokenize", len = normalized.len()).entered();
        let tokens = if normalized.contains(' ') {
            spaced::tokenize_spaced(self.lexicon, &normalized)
        } else {
            segment::segment_unspaced(self.lexicon, &normalized)
        };
        debug!(tokens = tokens.len(), "tokenized");
        tokens
    }

    /// Spaced mode on already-normalized text.
    pub fn tokenize_spaced(&self, normalized: &str) -> Vec<Token> {
        spaced::tokenize_spaced(self.lexicon, normalized)
    }

    /// Unspaced (dictionary segmentation) mode on already-normalized text.
    pub fn tokenize_unspaced(&self, normalized: &str) -> Vec<Token> {
        segment::segment_unspaced(self.lexicon, normalized)
    }
}
