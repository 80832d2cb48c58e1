//! Static lexicons: word dictionary, particle table, known titles and the
//! offline phrase table, plus the romaji table that backs the
//! [`SegmentConverter`].
//!
//! A [`Lexicon`] is built once and shared read-only (`&Lexicon` or
//! `Arc<Lexicon>`); nothing mutates it after construction.

mod config;

pub use config::{parse_lexicon_toml, LexiconError, LexiconTables, Particle};

use std::collections::HashMap;

use crate::romaji::{RomajiTable, RomajiTrie, SegmentConverter};
use crate::titles::KnownTitle;

pub(crate) const DEFAULT_LEXICON_TOML: &str = include_str!("default_lexicon.toml");

/// Returns the embedded default lexicon TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_LEXICON_TOML
}

/// An entry of the combined word + particle index used for segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct LexEntry {
    pub romaji: String,
    pub kana: String,
    /// Grammatical role when the romaji is also a particle.
    pub particle_role: Option<String>,
}

impl LexEntry {
    pub fn is_particle(&self) -> bool {
        self.particle_role.is_some()
    }

    /// Length in characters (keys are ASCII).
    pub fn len(&self) -> usize {
        self.romaji.len()
    }

    pub fn is_empty(&self) -> bool {
        self.romaji.is_empty()
    }
}

pub struct Lexicon {
    converter: SegmentConverter,
    words: HashMap<String, String>,
    particles: HashMap<String, Particle>,
    titles: Vec<KnownTitle>,
    phrases: HashMap<String, String>,
    entries: Vec<LexEntry>,
    index: RomajiTrie<usize>,
}

impl Lexicon {
    /// The lexicon embedded in the crate.
    ///
    /// The embedded TOML is validated by `build.rs` and by the tests below,
    /// so a failure here is a packaging bug.
    pub fn builtin() -> Self {
        Self::from_toml(DEFAULT_LEXICON_TOML, &RomajiTable::builtin())
            .expect("lexicon TOML must be valid")
    }

    pub fn from_toml(toml_str: &str, romaji: &RomajiTable) -> Result<Self, LexiconError> {
        Ok(Self::from_tables(parse_lexicon_toml(toml_str)?, romaji))
    }

    pub fn from_tables(tables: LexiconTables, romaji: &RomajiTable) -> Self {
        let LexiconTables {
            words,
            particles,
            titles,
            phrases,
        } = tables;

        // Particles take precedence over a word with the same romaji.
        let mut combined: Vec<LexEntry> = words
            .iter()
            .filter(|(romaji, _)| !particles.contains_key(*romaji))
            .map(|(romaji, kana)| LexEntry {
                romaji: romaji.clone(),
                kana: kana.clone(),
                particle_role: None,
            })
            .chain(particles.iter().map(|(romaji, p)| LexEntry {
                romaji: romaji.clone(),
                kana: p.hiragana.clone(),
                particle_role: Some(p.role.clone()),
            }))
            .collect();
        combined.sort_by(|a, b| a.romaji.cmp(&b.romaji));

        let mut index = RomajiTrie::new();
        for (id, entry) in combined.iter().enumerate() {
            index.insert(&entry.romaji, id);
        }

        Self {
            converter: SegmentConverter::new(romaji),
            words: words.into_iter().collect(),
            particles: particles.into_iter().collect(),
            titles,
            phrases: phrases.into_iter().collect(),
            entries: combined,
            index,
        }
    }

    pub fn converter(&self) -> &SegmentConverter {
        &self.converter
    }

    pub fn word(&self, romaji: &str) -> Option<&str> {
        self.words.get(romaji).map(String::as_str)
    }

    pub fn particle(&self, romaji: &str) -> Option<&Particle> {
        self.particles.get(romaji)
    }

    /// True when `romaji` is a dictionary word or a particle.
    pub fn is_known(&self, romaji: &str) -> bool {
        self.index.get(romaji).is_some()
    }

    /// Known titles in table order.
    pub fn titles(&self) -> &[KnownTitle] {
        &self.titles
    }

    /// Offline English for a kana phrase.
    pub fn phrase(&self, kana: &str) -> Option<&str> {
        self.phrases.get(kana).map(String::as_str)
    }

    /// Entries whose romaji matches `text` at its start, longest first.
    pub fn entries_at(&self, text: &str) -> Vec<&LexEntry> {
        self.index
            .common_prefix_search(text)
            .into_iter()
            .rev()
            .map(|(_, &id)| &self.entries[id])
            .collect()
    }

    /// True when some word or particle starts at the beginning of `text`.
    pub fn starts_entry(&self, text: &str) -> bool {
        self.index.has_prefix_of(text)
    }

    /// Returns (word_count, particle_count, title_count, phrase_count).
    pub fn stats(&self) -> (usize, usize, usize, usize) {
        (
            self.words.len(),
            self.particles.len(),
            self.titles.len(),
            self.phrases.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::titles::TitleType;

    #[test]
    fn builtin_loads() {
        let lex = Lexicon::builtin();
        let (words, particles, titles, phrases) = lex.stats();
        assert!(words > 200, "expected 200+ words, got {words}");
        assert_eq!(particles, 22);
        assert!(titles > 40);
        assert!(phrases > 60);
    }

    #[test]
    fn word_and_particle_lookup() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.word("watashi"), Some("わたし"));
        assert_eq!(lex.word("gakkou"), Some("がっこう"));
        let wa = lex.particle("wa").unwrap();
        assert_eq!(wa.hiragana, "は");
        assert_eq!(wa.role, "topic");
        assert!(lex.word("wa").is_none());
        assert!(lex.is_known("wa"));
        assert!(lex.is_known("neko"));
        assert!(!lex.is_known("xyzzy"));
    }

    #[test]
    fn particle_overrides_word_in_index() {
        // "ni" is both a number word and a particle.
        let lex = Lexicon::builtin();
        let hits = lex.entries_at("ni");
        let ni = hits.iter().find(|e| e.romaji == "ni").unwrap();
        assert!(ni.is_particle());
        assert_eq!(ni.kana, "に");
    }

    #[test]
    fn entries_at_longest_first() {
        let lex = Lexicon::builtin();
        let hits: Vec<&str> = lex
            .entries_at("watashitachiwa")
            .iter()
            .map(|e| e.romaji.as_str())
            .collect();
        assert_eq!(hits, vec!["watashitachi", "watashi", "wa"]);
    }

    #[test]
    fn starts_entry() {
        let lex = Lexicon::builtin();
        assert!(lex.starts_entry("nekodesu"));
        assert!(!lex.starts_entry("xyz"));
        assert!(!lex.starts_entry(""));
    }

    #[test]
    fn phrases_and_titles() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.phrase("こんにちは"), Some("hello; good afternoon"));
        let first = &lex.titles()[0];
        assert_eq!(first.key, "sousou no frieren");
        assert_eq!(first.title_type, TitleType::Anime);
    }

    #[test]
    fn custom_lexicon() {
        let toml = r#"
[words]
neko = "ねこ"

[particles]
ga = { hiragana = "が", role = "subject" }

[phrases]
"ねこ" = "cat"
"#;
        let lex = Lexicon::from_toml(toml, &RomajiTable::builtin()).unwrap();
        assert_eq!(lex.stats(), (1, 1, 0, 1));
        assert_eq!(lex.phrase("ねこ"), Some("cat"));
        assert_eq!(lex.converter().convert("ka"), "か");
    }
}
