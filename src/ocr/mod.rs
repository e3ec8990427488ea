//! OCR integration: word ingestion, canvas alignment, background hand-off.
//!
//! The recognizer itself is external; this module consumes its word-level
//! output and turns it into interactive, selectable overlay regions.

pub mod overlay;
pub mod types;
pub mod worker;

pub use overlay::{WordOverlay, WordOverlayItem};
pub use types::{BoundingBox, LineId, OcrWord, RawWord, collect_words};
pub use worker::OcrWorker;
