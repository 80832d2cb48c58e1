use std::collections::HashSet;

use super::lookup::LookupEntry;

pub(crate) const CONF_COMMON: f64 = 0.9;
pub(crate) const CONF_UNCOMMON: f64 = 0.75;

/// Meanings extracted from one lookup entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedEntry {
    pub meanings: Vec<String>,
    pub is_common: bool,
    pub jlpt: Vec<String>,
    pub parts_of_speech: Vec<String>,
}

/// Format the first `max_entries` entries, `senses_per_entry` senses each.
///
/// A sense's definitions are joined with `", "`; a joined string already
/// produced by an earlier sense is skipped, and entries left without any
/// meaning are dropped.
pub fn format_entries(
    entries: &[LookupEntry],
    max_entries: usize,
    senses_per_entry: usize,
) -> Vec<FormattedEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for entry in entries.iter().take(max_entries) {
        let mut meanings = Vec::new();
        for sense in entry.senses.iter().take(senses_per_entry) {
            let defs = sense.english_definitions.join(", ");
            if !defs.is_empty() && seen.insert(defs.clone()) {
                meanings.push(defs);
            }
        }
        if meanings.is_empty() {
            continue;
        }
        out.push(FormattedEntry {
            meanings,
            is_common: entry.is_common,
            jlpt: entry.jlpt.clone(),
            parts_of_speech: entry
                .senses
                .first()
                .map(|s| s.parts_of_speech.clone())
                .unwrap_or_default(),
        });
    }
    out
}

/// First definition of the first sense, used for word-by-word glosses.
pub fn first_definition(entries: &[LookupEntry]) -> Option<&str> {
    entries
        .first()?
        .senses
        .first()?
        .english_definitions
        .first()
        .map(String::as_str)
}

/// First `;`-separated meaning of an offline phrase.
pub fn first_meaning(phrase: &str) -> &str {
    phrase.split(';').next().unwrap_or(phrase).trim()
}
