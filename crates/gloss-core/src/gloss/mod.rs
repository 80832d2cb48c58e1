//! English gloss resolution for a kana string.
//!
//! Fallback chain: offline phrase table → whole-phrase remote lookup
//! (through the shared cache) → word-by-word → "unable to translate".
//! Lookup failures only move the chain to its next step.

mod cache;
mod format;
mod lookup;

#[cfg(test)]
mod tests;

pub use cache::{cache_key, TranslationCache};
pub use format::{first_definition, first_meaning, format_entries, FormattedEntry};
pub use lookup::{
    JapaneseForm, Lookup, LookupEntry, LookupEnvelope, LookupMeta, LookupResponse,
    OfflineLookup, Sense,
};

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::lexicon::Lexicon;
use crate::settings::GlossSettings;
use crate::tokenizer::Token;

pub(crate) const CONF_OFFLINE: f64 = 0.85;
pub(crate) const CONF_WORD_BY_WORD: f64 = 0.5;

/// Where a translation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationSource {
    Offline,
    Remote,
    RemoteWordByWord,
    KnownTitle,
    None,
    Error,
}

impl TranslationSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Remote => "remote",
            Self::RemoteWordByWord => "remote-word-by-word",
            Self::KnownTitle => "known-title",
            Self::None => "none",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TranslationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved gloss, before it is merged into a translation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Gloss {
    pub english: String,
    pub source: TranslationSource,
    pub confidence: f64,
    pub alternatives: Vec<String>,
    pub parts_of_speech: Vec<String>,
    /// JLPT tags of the primary remote entry.
    pub jlpt: Vec<String>,
}

impl Gloss {
    fn new(english: String, source: TranslationSource, confidence: f64) -> Self {
        Self {
            english,
            source,
            confidence,
            alternatives: Vec::new(),
            parts_of_speech: Vec::new(),
            jlpt: Vec::new(),
        }
    }
}

/// Conditions that abort gloss resolution as a whole.
#[derive(Debug, thiserror::Error)]
pub enum GlossError {
    #[error("translation cache lock poisoned")]
    CachePoisoned,
}

/// The translation orchestrator.
///
/// Cheap to clone; clones share the lexicon, the lookup service and the
/// cache. Two requests missing the same key may both go remote and both
/// write the cache; the last write wins.
#[derive(Clone)]
pub struct GlossResolver {
    lexicon: Arc<Lexicon>,
    lookup: Arc<dyn Lookup>,
    cache: Arc<Mutex<TranslationCache>>,
    settings: GlossSettings,
}

impl GlossResolver {
    pub fn new(
        lexicon: Arc<Lexicon>,
        lookup: Arc<dyn Lookup>,
        cache: Arc<Mutex<TranslationCache>>,
        settings: GlossSettings,
    ) -> Self {
        Self {
            lexicon,
            lookup,
            cache,
            settings,
        }
    }

    /// Resolve an English gloss for `kana`, produced from `tokens`.
    pub fn resolve(&self, kana: &str, tokens: &[Token]) -> Result<Gloss, GlossError> {
        let _span = debug_span!("resolve_gloss", kana, tokens = tokens.len()).entered();

        if let Some(english) = self.lexicon.phrase(kana) {
            debug!(source = "offline", "phrase table hit");
            return Ok(Gloss::new(
                english.to_string(),
                TranslationSource::Offline,
                CONF_OFFLINE,
            ));
        }

        if let Some(gloss) = self.resolve_remote(kana)? {
            return Ok(gloss);
        }

        if tokens.len() > 1 {
            return self.resolve_word_by_word(tokens);
        }

        debug!(source = "none", "no translation found");
        Ok(Gloss::new(
            format!("Unable to translate: {kana}"),
            TranslationSource::None,
            0.0,
        ))
    }

    fn resolve_remote(&self, kana: &str) -> Result<Option<Gloss>, GlossError> {
        let Some(entries) = self.cached_lookup(kana)? else {
            return Ok(None);
        };
        let formatted = format_entries(
            &entries,
            self.settings.max_entries,
            self.settings.senses_per_entry,
        );
        let Some((primary, rest)) = formatted.split_first() else {
            return Ok(None);
        };
        debug!(source = "remote", entries = formatted.len(), "remote gloss");
        Ok(Some(Gloss {
            english: primary.meanings.join("; "),
            source: TranslationSource::Remote,
            confidence: if primary.is_common {
                format::CONF_COMMON
            } else {
                format::CONF_UNCOMMON
            },
            alternatives: rest.iter().map(|e| e.meanings.join("; ")).collect(),
            parts_of_speech: primary.parts_of_speech.clone(),
            jlpt: primary.jlpt.clone(),
        }))
    }

    fn resolve_word_by_word(&self, tokens: &[Token]) -> Result<Gloss, GlossError> {
        let mut words = Vec::with_capacity(tokens.len());
        for token in tokens {
            if token.is_particle {
                let role = token.particle_role.as_deref().unwrap_or("particle");
                words.push(format!("[{role}]"));
                continue;
            }
            if let Some(phrase) = self.lexicon.phrase(&token.kana) {
                words.push(first_meaning(phrase).to_string());
                continue;
            }
            let remote = self.cached_lookup(&token.kana)?;
            match remote.as_deref().and_then(first_definition) {
                Some(def) => words.push(def.to_string()),
                None => words.push(format!("[{}?]", token.romaji)),
            }
        }
        debug!(source = "remote-word-by-word", words = words.len(), "word-by-word gloss");
        Ok(Gloss::new(
            words.join(" "),
            TranslationSource::RemoteWordByWord,
            CONF_WORD_BY_WORD,
        ))
    }

    /// Cache first, then the lookup service. Successful payloads are
    /// cached (empty ones included); failures return `None`.
    fn cached_lookup(&self, query: &str) -> Result<Option<Vec<LookupEntry>>, GlossError> {
        if let Some(hit) = self.lock_cache()?.get(query) {
            debug!(query, "cache hit");
            return Ok(Some(hit.to_vec()));
        }
        debug!(query, "cache miss");

        match self.lookup.lookup(query).into_result() {
            Ok(entries) => {
                self.lock_cache()?.put(query, entries.clone());
                Ok(Some(entries))
            }
            Err(error) => {
                warn!(query, %error, "lookup failed");
                Ok(None)
            }
        }
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, TranslationCache>, GlossError> {
        self.cache.lock().map_err(|_| GlossError::CachePoisoned)
    }
}
