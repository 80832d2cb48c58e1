use std::collections::BTreeMap;

use serde::Deserialize;

use super::table::DEFAULT_TOML;

#[derive(Deserialize)]
struct RomajiConfig {
    mappings: BTreeMap<String, String>,
    #[serde(default)]
    long_vowels: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("long vowel key must be a single character: {0}")]
    LongVowelKey(String),
}

/// Parsed romaji tables: the romaji → kana map and the macron → kana map.
#[derive(Debug, Clone)]
pub struct RomajiTable {
    pub mappings: BTreeMap<String, String>,
    pub long_vowels: BTreeMap<char, String>,
}

impl RomajiTable {
    /// The table embedded in the crate.
    ///
    /// The embedded TOML is validated by `build.rs` and covered by tests, so
    /// a parse failure here is a packaging bug.
    pub fn builtin() -> Self {
        parse_romaji_toml(DEFAULT_TOML).expect("romaji TOML must be valid")
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiConfigError> {
        parse_romaji_toml(toml_str)
    }
}

/// Parse TOML text into a [`RomajiTable`].
pub fn parse_romaji_toml(toml_str: &str) -> Result<RomajiTable, RomajiConfigError> {
    let config: RomajiConfig =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    for (key, value) in &config.mappings {
        if !key.is_ascii() {
            return Err(RomajiConfigError::NonAsciiKey(key.clone()));
        }
        if value.is_empty() {
            return Err(RomajiConfigError::EmptyValue(key.clone()));
        }
    }

    let mut long_vowels = BTreeMap::new();
    for (key, value) in config.long_vowels {
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(RomajiConfigError::LongVowelKey(key));
        };
        if value.is_empty() {
            return Err(RomajiConfigError::EmptyValue(key));
        }
        long_vowels.insert(ch, value);
    }

    Ok(RomajiTable {
        mappings: config.mappings,
        long_vowels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[mappings]
a = "あ"
ka = "か"

[long_vowels]
"ā" = "あ"
"#;
        let table = parse_romaji_toml(toml).unwrap();
        assert_eq!(table.mappings.len(), 2);
        assert_eq!(table.mappings["a"], "あ");
        assert_eq!(table.mappings["ka"], "か");
        assert_eq!(table.long_vowels[&'ā'], "あ");
    }

    #[test]
    fn long_vowels_are_optional() {
        let table = parse_romaji_toml("[mappings]\na = \"あ\"\n").unwrap();
        assert!(table.long_vowels.is_empty());
    }

    #[test]
    fn parse_default_toml() {
        let table = parse_romaji_toml(DEFAULT_TOML).unwrap();
        assert!(
            table.mappings.len() > 150,
            "expected 150+ mappings, got {}",
            table.mappings.len()
        );
        assert_eq!(table.long_vowels.len(), 10);
        // Later Hepburn variants override the plain forms.
        assert_eq!(table.mappings["ti"], "てぃ");
        assert_eq!(table.mappings["di"], "でぃ");
        assert_eq!(table.mappings["n'"], "ん");
    }

    #[test]
    fn error_empty_mappings() {
        let err = parse_romaji_toml("[mappings]\n").unwrap_err();
        assert!(matches!(err, RomajiConfigError::Empty));
    }

    #[test]
    fn error_non_ascii_key() {
        let toml = "
[mappings]
\"あ\" = \"a\"
";
        let err = parse_romaji_toml(toml).unwrap_err();
        assert!(matches!(err, RomajiConfigError::NonAsciiKey(_)));
    }

    #[test]
    fn error_empty_value() {
        let toml = r#"
[mappings]
a = ""
"#;
        let err = parse_romaji_toml(toml).unwrap_err();
        assert!(matches!(err, RomajiConfigError::EmptyValue(_)));
    }

    #[test]
    fn error_multi_char_long_vowel() {
        let toml = r#"
[mappings]
a = "あ"

[long_vowels]
"āā" = "あ"
"#;
        let err = parse_romaji_toml(toml).unwrap_err();
        assert!(matches!(err, RomajiConfigError::LongVowelKey(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_romaji_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, RomajiConfigError::Parse(_)));
    }
}
