//! The dictionary lookup seam and its payload types.
//!
//! A [`Lookup`] takes one query string and answers with a
//! [`LookupResponse`]. The concrete HTTP gateway lives in the engine crate;
//! this crate only consumes the structured success/failure shape.

use serde::{Deserialize, Serialize};

/// One reading/written form of a dictionary entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JapaneseForm {
    #[serde(default)]
    pub reading: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub english_definitions: Vec<String>,
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
}

/// A dictionary entry as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LookupEntry {
    #[serde(default)]
    pub japanese: Vec<JapaneseForm>,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(default)]
    pub is_common: bool,
    #[serde(default)]
    pub jlpt: Vec<String>,
}

/// Outcome of a single lookup.
///
/// On the wire this is `{success: true, data, meta: {status}}` or
/// `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LookupEnvelope", into = "LookupEnvelope")]
pub enum LookupResponse {
    Success { data: Vec<LookupEntry>, status: u16 },
    Failure { error: String },
}

impl LookupResponse {
    pub fn ok(data: Vec<LookupEntry>) -> Self {
        Self::Success { data, status: 200 }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn into_result(self) -> Result<Vec<LookupEntry>, String> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookupMeta {
    #[serde(default = "default_status")]
    pub status: u16,
}

fn default_status() -> u16 {
    200
}

/// Wire form of [`LookupResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<LookupEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LookupMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TryFrom<LookupEnvelope> for LookupResponse {
    type Error = String;

    fn try_from(env: LookupEnvelope) -> Result<Self, Self::Error> {
        match (env.success, env.data) {
            (true, Some(data)) => Ok(Self::Success {
                data,
                status: env.meta.map_or(200, |m| m.status),
            }),
            (true, None) => Err("success response without data".to_string()),
            (false, _) => Ok(Self::Failure {
                error: env.error.unwrap_or_else(|| "Translation failed".to_string()),
            }),
        }
    }
}

impl From<LookupResponse> for LookupEnvelope {
    fn from(resp: LookupResponse) -> Self {
        match resp {
            LookupResponse::Success { data, status } => LookupEnvelope {
                success: true,
                data: Some(data),
                meta: Some(LookupMeta { status }),
                error: None,
            },
            LookupResponse::Failure { error } => LookupEnvelope {
                success: false,
                data: None,
                meta: None,
                error: Some(error),
            },
        }
    }
}

/// A dictionary lookup service.
///
/// Implementations handle their own pacing and error translation; a
/// failure is an ordinary [`LookupResponse::Failure`], never a panic.
pub trait Lookup: Send + Sync {
    fn lookup(&self, query: &str) -> LookupResponse;
}

/// A lookup that always fails. Leaves only the offline tables in play.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

impl Lookup for OfflineLookup {
    fn lookup(&self, _query: &str) -> LookupResponse {
        LookupResponse::failure("Offline mode")
    }
}
