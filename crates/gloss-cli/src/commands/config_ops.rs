use std::fs;

use gloss_core::lexicon::LexiconError;
use gloss_core::romaji::{parse_romaji_toml, RomajiConfigError, RomajiTable};
use gloss_core::settings::{parse_settings_toml, SettingsError};
use gloss_core::Lexicon;

use super::die;

pub fn romaji_export() {
    print!("{}", gloss_core::romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    println!("{}", die!(romaji_summary(&content), "Error: {}"));
}

pub fn lexicon_export() {
    print!("{}", gloss_core::lexicon::default_toml());
}

pub fn lexicon_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    println!("{}", die!(lexicon_summary(&content), "Error: {}"));
}

pub fn settings_export() {
    print!("{}", gloss_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    println!("{}", die!(settings_summary(&content), "Error: {}"));
}

pub fn romaji_summary(content: &str) -> Result<String, RomajiConfigError> {
    let table = parse_romaji_toml(content)?;
    Ok(format!(
        "OK: {} mappings, {} long vowels",
        table.mappings.len(),
        table.long_vowels.len()
    ))
}

/// Lexicon files are checked against the built-in romaji table, which
/// supplies the kana for its segmentation index.
pub fn lexicon_summary(content: &str) -> Result<String, LexiconError> {
    let lexicon = Lexicon::from_toml(content, &RomajiTable::builtin())?;
    let (words, particles, titles, phrases) = lexicon.stats();
    Ok(format!(
        "OK: {words} words, {particles} particles, {titles} titles, {phrases} phrases"
    ))
}

pub fn settings_summary(content: &str) -> Result<String, SettingsError> {
    let s = parse_settings_toml(content)?;
    Ok(format!(
        "OK: cache.capacity={}, gloss.max_entries={}, gateway.endpoint={}",
        s.cache.capacity, s.gloss.max_entries, s.gateway.endpoint
    ))
}
