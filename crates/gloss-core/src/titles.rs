//! Known-title / proper-name matching.
//!
//! Runs on the whole input before tokenization so that recognized titles
//! ("Sousou no Frieren") are glossed as names instead of word by word.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::Lexicon;

/// Inputs and keys at most this long cannot match by substring alone.
const MIN_SUBSTRING_MATCH_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    Anime,
    Name,
    Game,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnownTitle {
    /// Normalized romaji key.
    pub key: String,
    pub japanese: String,
    pub english: String,
    #[serde(rename = "type")]
    pub title_type: TitleType,
}

/// How a title was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleMatchKind {
    Exact,
    WithoutNo,
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleMatch<'a> {
    pub title: &'a KnownTitle,
    pub kind: TitleMatchKind,
}

/// Lowercase, trim, turn `:`/`-`/`_` into spaces and collapse whitespace.
pub fn normalize_title(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced: String = lowered
        .chars()
        .map(|c| if matches!(c, ':' | '-' | '_') { ' ' } else { c })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct TitleMatcher<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> TitleMatcher<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Check `text` against the known-title table.
    ///
    /// Tried in order: exact key, key with standalone "no" removed, then
    /// substring containment in either direction (first qualifying entry in
    /// table order wins).
    pub fn check(&self, text: &str) -> Option<TitleMatch<'a>> {
        let normalized = normalize_title(text);
        if normalized.is_empty() {
            return None;
        }
        let titles = self.lexicon.titles();
        let found = |key: &str| titles.iter().find(|t| t.key == key);

        if let Some(title) = found(&normalized) {
            return Some(self.matched(title, TitleMatchKind::Exact));
        }

        let without_no = normalized
            .split(' ')
            .filter(|w| *w != "no")
            .collect::<Vec<_>>()
            .join(" ");
        if without_no != normalized {
            if let Some(title) = found(&without_no) {
                return Some(self.matched(title, TitleMatchKind::WithoutNo));
            }
        }

        let input_len = normalized.chars().count();
        titles
            .iter()
            .find(|t| {
                (normalized.contains(t.key.as_str()) || t.key.contains(normalized.as_str()))
                    && (t.key.chars().count() > MIN_SUBSTRING_MATCH_LEN
                        || input_len > MIN_SUBSTRING_MATCH_LEN)
            })
            .map(|title| self.matched(title, TitleMatchKind::Substring))
    }

    fn matched(&self, title: &'a KnownTitle, kind: TitleMatchKind) -> TitleMatch<'a> {
        debug!(key = %title.key, ?kind, "known title");
        TitleMatch { title, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::romaji::RomajiTable;

    fn lexicon() -> Lexicon {
        Lexicon::builtin()
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Re:Zero "), "re zero");
        assert_eq!(normalize_title("Spy-x__Family"), "spy x family");
        assert_eq!(normalize_title("Sousou  no\tFrieren"), "sousou no frieren");
    }

    #[test]
    fn test_exact_match() {
        let lex = lexicon();
        let m = TitleMatcher::new(&lex).check("Sousou no Frieren").unwrap();
        assert_eq!(m.kind, TitleMatchKind::Exact);
        assert_eq!(m.title.japanese, "葬送のフリーレン");
        assert_eq!(m.title.english, "Frieren: Beyond Journey's End");
        assert_eq!(m.title.title_type, TitleType::Anime);
    }

    #[test]
    fn test_punctuation_normalized_exact() {
        let lex = lexicon();
        let m = TitleMatcher::new(&lex).check("Re:Zero").unwrap();
        assert_eq!(m.kind, TitleMatchKind::Exact);
        assert_eq!(m.title.japanese, "リゼロ");
    }

    #[test]
    fn test_without_no() {
        let lex = lexicon();
        // "spy no x family" only matches once "no" is dropped.
        let m = TitleMatcher::new(&lex).check("Spy no X Family").unwrap();
        assert_eq!(m.kind, TitleMatchKind::WithoutNo);
        assert_eq!(m.title.key, "spy x family");
    }

    #[test]
    fn test_substring_input_contains_key() {
        let lex = lexicon();
        let m = TitleMatcher::new(&lex)
            .check("I love Naruto Shippuden so much")
            .unwrap();
        assert_eq!(m.kind, TitleMatchKind::Substring);
        // "naruto" precedes "naruto shippuden" in table order
        assert_eq!(m.title.key, "naruto");
    }

    #[test]
    fn test_substring_key_contains_input() {
        let lex = lexicon();
        let m = TitleMatcher::new(&lex).check("frieren").unwrap();
        // exact wins over the longer "sousou no frieren"
        assert_eq!(m.kind, TitleMatchKind::Exact);
        assert_eq!(m.title.title_type, TitleType::Name);

        let m = TitleMatcher::new(&lex).check("shingeki").unwrap();
        assert_eq!(m.kind, TitleMatchKind::Substring);
        assert_eq!(m.title.english, "Attack on Titan");
    }

    #[test]
    fn test_short_key_and_input_rejected() {
        let toml = r#"
[words]
neko = "ねこ"

[particles]
wa = { hiragana = "は", role = "topic" }

[[titles]]
key = "mario"
japanese = "マリオ"
english = "Mario"
type = "name"
"#;
        let lex = Lexicon::from_toml(toml, &RomajiTable::builtin()).unwrap();
        let matcher = TitleMatcher::new(&lex);
        // both sides are five characters or fewer
        assert!(matcher.check("mari").is_none());
        // the input is long enough
        assert!(matcher.check("super mario").is_some());
        assert_eq!(matcher.check("Mario").unwrap().kind, TitleMatchKind::Exact);
    }

    #[test]
    fn test_no_match() {
        let lex = lexicon();
        let matcher = TitleMatcher::new(&lex);
        assert!(matcher.check("watashi wa").is_none());
        assert!(matcher.check("gakkou").is_none());
        assert!(matcher.check("   ").is_none());
    }
}
