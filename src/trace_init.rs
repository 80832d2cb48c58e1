//! Optional JSON-lines tracing to a file, behind the `trace` feature.

#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::OnceLock;

#[cfg(feature = "trace")]
use tracing_appender::non_blocking::WorkerGuard;
#[cfg(feature = "trace")]
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

pub const TRACE_FILE: &str = "gloss-trace.jsonl";

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "gloss_engine=debug,gloss_core=debug";

/// Writer guard; stays in the static so buffered lines are never dropped.
#[cfg(feature = "trace")]
static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Send spans and events to `log_dir/gloss-trace.jsonl`.
///
/// Only the first call installs a subscriber. `RUST_LOG` replaces the
/// default filter.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    GUARD.get_or_init(|| {
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, TRACE_FILE));
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init();
        if installed.is_err() {
            eprintln!("tracing: a global subscriber is already set");
        }
        guard
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}
