//! The translation request pipeline.
//!
//! Two phases: [`Translator::transliterate`] is synchronous and never
//! touches the network (empty check, title match, tokenization);
//! [`Translator::gloss`] resolves the English text and may block on
//! lookups. [`Translator::translate`] runs both back to back.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, debug_span, error};

use crate::detect;
use crate::gloss::{GlossResolver, Lookup, TranslationCache};
use crate::lexicon::Lexicon;
use crate::settings::Settings;
use crate::titles::{TitleMatcher, TitleType};
use crate::tokenizer::{average_confidence, join_kana, Token, Tokenizer};

pub use crate::gloss::TranslationSource;

pub const EMPTY_INPUT_MESSAGE: &str = "No text to translate";
pub const FAILURE_MESSAGE: &str = "Translation failed - please try again";
pub const PROPER_NAME_NOTE: &str = "This may be a proper name/title. Showing literal translation.";

/// Confidence multiplier for input that looks like an unknown proper name.
const PROPER_NAME_PENALTY: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub romaji: String,
    pub kana: String,
    pub english: String,
    pub tokens: Vec<Token>,
    pub confidence: f64,
    pub source: TranslationSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_type: Option<TitleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts_of_speech: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jlpt: Vec<String>,
}

impl TranslationResult {
    fn empty() -> Self {
        Self {
            romaji: String::new(),
            kana: String::new(),
            english: EMPTY_INPUT_MESSAGE.to_string(),
            tokens: Vec::new(),
            confidence: 0.0,
            source: TranslationSource::None,
            alternatives: Vec::new(),
            title_type: None,
            note: None,
            parts_of_speech: Vec::new(),
            jlpt: Vec::new(),
        }
    }
}

/// Tokenized input waiting for its gloss.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGloss {
    /// Trimmed input as the user wrote it.
    pub romaji: String,
    pub kana: String,
    pub tokens: Vec<Token>,
    /// Average token confidence.
    pub confidence: f64,
    pub possible_proper_name: bool,
}

/// Outcome of the synchronous phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Transliteration {
    /// Empty input or a known title; no gloss phase needed.
    Done(TranslationResult),
    Pending(PendingGloss),
}

impl Transliteration {
    pub fn kana(&self) -> &str {
        match self {
            Self::Done(result) => &result.kana,
            Self::Pending(pending) => &pending.kana,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Input with an ASCII capital where some word starts with a character
/// that uppercasing leaves unchanged.
fn looks_like_proper_name(text: &str) -> bool {
    let upper_invariant = |c: char| {
        let mut upper = c.to_uppercase();
        upper.next() == Some(c) && upper.next().is_none()
    };
    text.chars().any(|c| c.is_ascii_uppercase())
        && text
            .split_whitespace()
            .any(|w| w.chars().next().is_some_and(upper_invariant))
}

/// Runs translation requests against a shared lexicon, lookup service and
/// cache. Cheap to clone; clones share all three.
#[derive(Clone)]
pub struct Translator {
    lexicon: Arc<Lexicon>,
    resolver: GlossResolver,
}

impl Translator {
    pub fn new(lexicon: Arc<Lexicon>, lookup: Arc<dyn Lookup>, settings: &Settings) -> Self {
        let cache = Arc::new(Mutex::new(TranslationCache::new(settings.cache.capacity)));
        Self::with_cache(lexicon, lookup, cache, settings)
    }

    /// Like [`Translator::new`] with an externally owned cache.
    pub fn with_cache(
        lexicon: Arc<Lexicon>,
        lookup: Arc<dyn Lookup>,
        cache: Arc<Mutex<TranslationCache>>,
        settings: &Settings,
    ) -> Self {
        let resolver =
            GlossResolver::new(lexicon.clone(), lookup, cache, settings.gloss.clone());
        Self { lexicon, resolver }
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Tokenizer::new(&self.lexicon).tokenize(text)
    }

    /// Kana transliteration only. No title check, no lookups.
    pub fn quick_kana(&self, text: &str) -> String {
        join_kana(&self.tokenize(text))
    }

    pub fn is_likely_romaji(&self, text: &str) -> bool {
        detect::is_likely_romaji(&self.lexicon, text)
    }

    /// Synchronous phase: empty check, known-title short-circuit, tokenize.
    pub fn transliterate(&self, text: &str) -> Transliteration {
        let romaji = text.trim();
        if romaji.is_empty() {
            debug!("empty input");
            return Transliteration::Done(TranslationResult::empty());
        }

        if let Some(m) = TitleMatcher::new(&self.lexicon).check(romaji) {
            return Transliteration::Done(TranslationResult {
                romaji: romaji.to_string(),
                kana: m.title.japanese.clone(),
                english: m.title.english.clone(),
                tokens: Vec::new(),
                confidence: 1.0,
                source: TranslationSource::KnownTitle,
                alternatives: Vec::new(),
                title_type: Some(m.title.title_type),
                note: None,
                parts_of_speech: Vec::new(),
                jlpt: Vec::new(),
            });
        }

        let tokens = self.tokenize(romaji);
        Transliteration::Pending(PendingGloss {
            romaji: romaji.to_string(),
            kana: join_kana(&tokens),
            confidence: average_confidence(&tokens),
            tokens,
            possible_proper_name: looks_like_proper_name(text),
        })
    }

    /// Gloss phase. Failures inside the resolver become a `source = error`
    /// result that still carries the kana and tokens.
    pub fn gloss(&self, pending: PendingGloss) -> TranslationResult {
        let PendingGloss {
            romaji,
            kana,
            tokens,
            confidence,
            possible_proper_name,
        } = pending;

        match self.resolver.resolve(&kana, &tokens) {
            Ok(gloss) => {
                let mut combined = confidence.min(gloss.confidence);
                let note = if possible_proper_name {
                    combined *= PROPER_NAME_PENALTY;
                    Some(PROPER_NAME_NOTE.to_string())
                } else {
                    None
                };
                debug!(source = %gloss.source, confidence = combined, "translated");
                TranslationResult {
                    romaji,
                    kana,
                    english: gloss.english,
                    tokens,
                    confidence: combined,
                    source: gloss.source,
                    alternatives: gloss.alternatives,
                    title_type: None,
                    note,
                    parts_of_speech: gloss.parts_of_speech,
                    jlpt: gloss.jlpt,
                }
            }
            Err(e) => {
                error!(error = %e, "translation failed");
                TranslationResult {
                    romaji,
                    kana,
                    english: FAILURE_MESSAGE.to_string(),
                    tokens,
                    confidence: 0.0,
                    source: TranslationSource::Error,
                    alternatives: Vec::new(),
                    title_type: None,
                    note: None,
                    parts_of_speech: Vec::new(),
                    jlpt: Vec::new(),
                }
            }
        }
    }

    /// Both phases, blocking.
    pub fn translate(&self, text: &str) -> TranslationResult {
        let _span = debug_span!("translate", len = text.len()).entered();
        match self.transliterate(text) {
            Transliteration::Done(result) => result,
            Transliteration::Pending(pending) => self.gloss(pending),
        }
    }
}
