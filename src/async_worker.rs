use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use gloss_core::translate::{Transliteration, Translator};
use gloss_core::TranslationResult;
use tracing::debug;

use crate::EngineError;

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

/// Returned by [`GlossWorker::submit`] as soon as the synchronous phase is
/// done.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub generation: u64,
    /// Kana to display while the gloss is resolved.
    pub kana: String,
    /// False when the final result is already known (empty input or a
    /// known title) and has been queued without a background thread.
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlossUpdate {
    pub generation: u64,
    pub result: TranslationResult,
}

// ---------------------------------------------------------------------------
// GlossWorker
// ---------------------------------------------------------------------------

/// Delivers translation results from background threads.
///
/// Each submission gets a new generation. Results whose generation is no
/// longer current are dropped on receipt; in-flight work is never
/// cancelled.
pub(crate) struct GlossWorker {
    translator: Translator,
    result_tx: mpsc::Sender<GlossUpdate>,
    result_rx: Mutex<mpsc::Receiver<GlossUpdate>>,
    generation: Arc<AtomicU64>,
}

impl GlossWorker {
    pub fn new(translator: Translator) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            translator,
            result_tx,
            result_rx: Mutex::new(result_rx),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn submit(&self, text: &str) -> Result<Submission, EngineError> {
        let gen = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let stage = self.translator.transliterate(text);
        let kana = stage.kana().to_string();

        let pending = match stage {
            Transliteration::Done(result) => {
                let _ = self.result_tx.send(GlossUpdate {
                    generation: gen,
                    result,
                });
                false
            }
            Transliteration::Pending(work) => {
                let translator = self.translator.clone();
                let tx = self.result_tx.clone();
                let current = Arc::clone(&self.generation);
                thread::Builder::new()
                    .name(format!("gloss-{gen}"))
                    .spawn(move || {
                        let result = translator.gloss(work);
                        // Stale results are filtered on receipt too; this
                        // just avoids queueing them.
                        if gen != current.load(Ordering::SeqCst) {
                            debug!(generation = gen, "dropping superseded gloss");
                            return;
                        }
                        let _ = tx.send(GlossUpdate {
                            generation: gen,
                            result,
                        });
                    })
                    .map_err(EngineError::Spawn)?;
                true
            }
        };

        debug!(generation = gen, pending, "submitted");
        Ok(Submission {
            generation: gen,
            kana,
            pending,
        })
    }

    /// Supersede everything in flight.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, update: &GlossUpdate) -> bool {
        update.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Next current result, if one is ready. Stale results are discarded.
    pub fn try_recv(&self) -> Option<GlossUpdate> {
        let rx = self.result_rx.lock().ok()?;
        while let Ok(update) = rx.try_recv() {
            if self.is_current(&update) {
                return Some(update);
            }
        }
        None
    }

    /// Wait up to `timeout` for the current result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<GlossUpdate> {
        let deadline = Instant::now() + timeout;
        let rx = self.result_rx.lock().ok()?;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let update = rx.recv_timeout(remaining).ok()?;
            if self.is_current(&update) {
                return Some(update);
            }
        }
    }
}
