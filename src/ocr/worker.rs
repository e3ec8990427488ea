//! Background OCR hand-off.
//!
//! Recognition takes hundreds of milliseconds to seconds depending on image
//! size, so it runs off the UI thread; the finished word list comes back as a
//! one-shot the UI thread consumes before any alignment touches shared state.
//! Alignment itself is pure computation and always runs inline.

use std::sync::mpsc::{self, Receiver};

use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::OcrError;
use crate::ocr::types::{OcrWord, RawWord, collect_words};

/// Runs recognizer closures on a background runtime.
pub struct OcrWorker {
    runtime: Runtime,
}

impl OcrWorker {
    pub fn new() -> Result<Self, OcrError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("ocr-worker")
            .build()
            .map_err(|e| OcrError::WorkerUnavailable(e.to_string()))?;
        Ok(Self { runtime })
    }

    /// Run `recognize` off-thread and deliver the filtered word list.
    ///
    /// The returned receiver yields exactly one message. There is no timeout
    /// here: a hung recognizer is the engine integration's concern, not the
    /// alignment logic's.
    pub fn recognize<F>(
        &self,
        min_confidence: f32,
        recognize: F,
    ) -> Receiver<Result<Vec<OcrWord>, OcrError>>
    where
        F: FnOnce() -> anyhow::Result<Vec<RawWord>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.runtime.spawn_blocking(move || {
            let result = recognize()
                .map(|raw| {
                    let words = collect_words(raw, min_confidence);
                    debug!(words = words.len(), "recognition complete");
                    words
                })
                .map_err(|e| OcrError::Recognition(e.to_string()));
            let _ = tx.send(result);
        });
        rx
    }
}
