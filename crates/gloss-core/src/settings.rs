//! Tunable settings loaded from TOML.
//!
//! - `Settings::builtin()` parses the embedded `default_settings.toml`
//! - `parse_settings_toml()` loads and validates a custom file
//!
//! Settings are passed by value into the components that need them.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub cache: CacheSettings,
    pub gloss: GlossSettings,
    pub gateway: GatewaySettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of cached lookup payloads.
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlossSettings {
    /// Lookup entries formatted into a remote gloss.
    pub max_entries: usize,
    /// Senses taken from each entry.
    pub senses_per_entry: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewaySettings {
    pub endpoint: String,
    /// Minimum spacing between consecutive outbound requests.
    pub min_request_interval_ms: u64,
    pub timeout_secs: u64,
}

impl GatewaySettings {
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// The embedded defaults. Validated by `build.rs` and the tests below.
    pub fn builtin() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("settings TOML must be valid")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Parse and validate settings TOML.
pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(cache.capacity);
    check_positive!(gloss.max_entries);
    check_positive!(gloss.senses_per_entry);
    check_positive!(gateway.timeout_secs);

    let endpoint = &s.gateway.endpoint;
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(SettingsError::InvalidValue {
            field: "gateway.endpoint".to_string(),
            reason: format!("must be an http(s) URL, got {endpoint:?}"),
        });
    }

    Ok(())
}
