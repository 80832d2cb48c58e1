//! HTTP lookup gateway backed by the Jisho word-search API.

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use gloss_core::gloss::{Lookup, LookupEntry, LookupMeta, LookupResponse};
use gloss_core::settings::GatewaySettings;
use serde::Deserialize;
use tracing::{debug, debug_span, warn};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Empty query")]
    EmptyQuery,
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Network error - check your internet connection")]
    Network(#[source] ureq::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for GatewayError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(status) => Self::Status {
                status,
                reason: ureq::http::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown")
                    .to_string(),
            },
            other => Self::Network(other),
        }
    }
}

/// Body of a word-search response. Only `data` and `meta` are used.
#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    data: Option<Vec<LookupEntry>>,
    #[serde(default)]
    meta: Option<LookupMeta>,
}

/// Decode a word-search response body into entries and the reported status.
pub fn decode_body(body: &str) -> Result<(Vec<LookupEntry>, u16), GatewayError> {
    let parsed: SearchBody = serde_json::from_str(body)?;
    let status = parsed.meta.map_or(200, |m| m.status);
    Ok((parsed.data.unwrap_or_default(), status))
}

/// Blocking HTTP gateway with request pacing.
///
/// Consecutive outbound requests are spaced at least
/// `min_request_interval` apart, across all threads sharing the gateway.
pub struct JishoGateway {
    agent: ureq::Agent,
    endpoint: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl JishoGateway {
    pub fn new(settings: &GatewaySettings) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(settings.timeout()))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            endpoint: settings.endpoint.clone(),
            min_interval: settings.min_request_interval(),
            last_request: Mutex::new(None),
        }
    }

    /// Wait until the minimum interval since the previous request has
    /// passed, then mark a new request as started.
    fn pace(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                thread::sleep(self.min_interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }

    pub fn fetch(&self, query: &str) -> Result<(Vec<LookupEntry>, u16), GatewayError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GatewayError::EmptyQuery);
        }
        let _span = debug_span!("gateway_fetch", query).entered();

        self.pace();
        let body = self
            .agent
            .get(&self.endpoint)
            .query("keyword", query)
            .header("Accept", "application/json")
            .call()?
            .into_body()
            .read_to_string()?;
        let (entries, status) = decode_body(&body)?;
        debug!(entries = entries.len(), status, "lookup ok");
        Ok((entries, status))
    }
}

impl Lookup for JishoGateway {
    fn lookup(&self, query: &str) -> LookupResponse {
        match self.fetch(query) {
            Ok((data, status)) => LookupResponse::Success { data, status },
            Err(e) => {
                warn!(query, error = %e, "gateway request failed");
                LookupResponse::failure(e.to_string())
            }
        }
    }
}
