//! Cheap "is this romaji?" heuristic for deciding whether to offer a gloss.

use std::sync::OnceLock;

use regex::RegexSet;

use crate::lexicon::Lexicon;

/// Spellings that rarely occur outside romanized Japanese.
const ROMAJI_PATTERNS: &[&str] = &[
    r"desu$",
    r"masu$",
    r"kudasai",
    r"arigatou",
    r"konnichiwa",
    r"shi(?:[^tp]|$)",
    r"chi",
    r"tsu",
    r"[^c]hu",
    r"[^s]ha",
];

fn patterns() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| RegexSet::new(ROMAJI_PATTERNS).expect("romaji patterns must compile"))
}

/// True when `text` matches a typical romaji spelling, or more than half of
/// its whitespace-delimited words are dictionary words or particles.
pub fn is_likely_romaji(lexicon: &Lexicon, text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    if patterns().is_match(&normalized) {
        return true;
    }
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let known = words.iter().filter(|w| lexicon.is_known(w)).count();
    known * 2 > words.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> bool {
        is_likely_romaji(&Lexicon::builtin(), text)
    }

    #[test]
    fn test_patterns() {
        assert!(check("Arigatou"));
        assert!(check("tabemasu"));
        assert!(check("nani desu"));
        assert!(check("onegai shimasu ka"));
        assert!(check("ohayou gozaimasu"));
        assert!(check("tsunami"));
        assert!(check("chiisai"));
    }

    #[test]
    fn test_shi_lookahead() {
        // "shi" before t/p alone does not count
        assert!(!check("shipment"));
        assert!(!check("shitty"));
        assert!(check("sushi"));
    }

    #[test]
    fn test_hu_ha_context() {
        assert!(!check("chuck"));
        assert!(check("fuhu"));
        assert!(!check("shark"));
        assert!(check("what"));
        // nothing precedes the match at the start of the text
        assert!(!check("hat"));
    }

    #[test]
    fn test_dictionary_majority() {
        assert!(check("neko ga iru"));
        assert!(check("watashi wa"));
        assert!(!check("the cat is here"));
        // exactly half is not enough
        assert!(!check("neko dog"));
    }

    #[test]
    fn test_empty() {
        assert!(!check(""));
        assert!(!check("   "));
    }
}
