use std::collections::BTreeMap;

use serde::Deserialize;

use crate::titles::KnownTitle;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Particle {
    pub hiragana: String,
    pub role: String,
}

/// Raw lexicon tables as read from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconTables {
    pub words: BTreeMap<String, String>,
    pub particles: BTreeMap<String, Particle>,
    /// Kept as an array so table order survives parsing.
    #[serde(default)]
    pub titles: Vec<KnownTitle>,
    #[serde(default)]
    pub phrases: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[{0}] table is empty")]
    Empty(&'static str),
    #[error("key must be non-empty lowercase ASCII: {0:?}")]
    InvalidKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("duplicate title key: {0}")]
    DuplicateTitle(String),
}

fn check_key(key: &str) -> Result<(), LexiconError> {
    if key.is_empty() || !key.is_ascii() || key.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(LexiconError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Parse and validate lexicon TOML.
pub fn parse_lexicon_toml(toml_str: &str) -> Result<LexiconTables, LexiconError> {
    let tables: LexiconTables =
        toml::from_str(toml_str).map_err(|e| LexiconError::Parse(e.to_string()))?;

    if tables.words.is_empty() {
        return Err(LexiconError::Empty("words"));
    }
    if tables.particles.is_empty() {
        return Err(LexiconError::Empty("particles"));
    }

    for (key, kana) in &tables.words {
        check_key(key)?;
        if kana.is_empty() {
            return Err(LexiconError::EmptyValue(key.clone()));
        }
    }
    for (key, particle) in &tables.particles {
        check_key(key)?;
        if particle.hiragana.is_empty() || particle.role.is_empty() {
            return Err(LexiconError::EmptyValue(key.clone()));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for title in &tables.titles {
        if title.key.is_empty() || title.japanese.is_empty() || title.english.is_empty() {
            return Err(LexiconError::EmptyValue(title.key.clone()));
        }
        if !seen.insert(title.key.as_str()) {
            return Err(LexiconError::DuplicateTitle(title.key.clone()));
        }
    }

    for (kana, english) in &tables.phrases {
        if kana.is_empty() || english.is_empty() {
            return Err(LexiconError::EmptyValue(kana.clone()));
        }
    }

    Ok(tables)
}
