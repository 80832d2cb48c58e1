//! Romaji-to-English glossing engine.
//!
//! Wires the pure pipeline in `gloss_core` to a live HTTP lookup gateway
//! and a background worker that delivers results by generation.

mod async_worker;
pub mod gateway;
pub mod trace_init;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use gloss_core::gloss::Lookup;
use gloss_core::lexicon::LexiconError;
use gloss_core::romaji::RomajiTable;
use gloss_core::settings::{parse_settings_toml, SettingsError};
use tracing::info;

pub use async_worker::{GlossUpdate, Submission};
pub use gateway::{GatewayError, JishoGateway};
pub use gloss_core::{
    Lexicon, Settings, Token, TranslationResult, TranslationSource, Translator,
};
pub use trace_init::init_tracing;

use async_worker::GlossWorker;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    #[error("failed to spawn gloss thread: {0}")]
    Spawn(#[source] std::io::Error),
}

fn read_file(path: &Path) -> Result<String, EngineError> {
    fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Owns a [`Translator`] and a background worker around it.
pub struct GlossEngine {
    translator: Translator,
    worker: GlossWorker,
}

impl GlossEngine {
    /// Built-in lexicon, live Jisho gateway.
    pub fn new(settings: Settings) -> Self {
        let gateway = Arc::new(JishoGateway::new(&settings.gateway));
        Self::with_lookup(Arc::new(Lexicon::builtin()), gateway, &settings)
    }

    pub fn with_lookup(lexicon: Arc<Lexicon>, lookup: Arc<dyn Lookup>, settings: &Settings) -> Self {
        let translator = Translator::new(lexicon, lookup, settings);
        let worker = GlossWorker::new(translator.clone());
        Self { translator, worker }
    }

    /// Load an optional lexicon and settings file, falling back to the
    /// built-ins for whichever is `None`.
    pub fn from_files(
        lexicon_path: Option<&Path>,
        settings_path: Option<&Path>,
    ) -> Result<Self, EngineError> {
        let settings = match settings_path {
            Some(p) => parse_settings_toml(&read_file(p)?)?,
            None => Settings::builtin(),
        };
        let lexicon = match lexicon_path {
            Some(p) => Lexicon::from_toml(&read_file(p)?, &RomajiTable::builtin())?,
            None => Lexicon::builtin(),
        };
        let (words, particles, titles, phrases) = lexicon.stats();
        info!(words, particles, titles, phrases, "lexicon loaded");
        let gateway = Arc::new(JishoGateway::new(&settings.gateway));
        Ok(Self::with_lookup(Arc::new(lexicon), gateway, &settings))
    }

    pub fn quick_kana(&self, text: &str) -> String {
        self.translator.quick_kana(text)
    }

    pub fn is_likely_romaji(&self, text: &str) -> bool {
        self.translator.is_likely_romaji(text)
    }

    /// Blocking translation on the calling thread.
    pub fn translate(&self, text: &str) -> TranslationResult {
        self.translator.translate(text)
    }

    /// Start a translation in the background. Supersedes any earlier
    /// submission; only the newest generation is ever delivered.
    pub fn submit(&self, text: &str) -> Result<Submission, EngineError> {
        self.worker.submit(text)
    }

    pub fn try_recv(&self) -> Option<GlossUpdate> {
        self.worker.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<GlossUpdate> {
        self.worker.recv_timeout(timeout)
    }

    pub fn invalidate(&self) {
        self.worker.invalidate();
    }

    /// Generation of the most recent submission or invalidation.
    pub fn generation(&self) -> u64 {
        self.worker.current_generation()
    }
}
