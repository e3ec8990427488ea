// Unified error handling module
//
// Centralized error types for consistent error management across the crate.

use std::io;
use thiserror::Error;

/// Top-level error type for the capture core.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Monitor error: {0}")]
    Monitor(#[from] MonitorError),

    #[error("Screen match error: {0}")]
    Match(#[from] MatchError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Monitor enumeration / capture backend errors.
///
/// Enumeration failures are fatal to starting a capture session: the caller
/// surfaces them and aborts instead of guessing at display geometry.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Capture backend initialization failed: {0}")]
    Enumeration(String),

    #[error("Backend reported no physical monitors")]
    NoMonitors,

    #[error("Screen capture failed: {0}")]
    Capture(String),
}

/// Logical-screen-to-monitor matching errors.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A logical screen overlaps no physical monitor. Treated as an
    /// environment problem, not recoverable in-process.
    #[error("Logical screen at ({left}, {top}) {width}x{height} matches no monitor")]
    NoMatch {
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    },
}

/// OCR integration errors.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR worker unavailable: {0}")]
    WorkerUnavailable(String),

    #[error("Recognition failed: {0}")]
    Recognition(String),
}

/// Result type alias for convenience.
pub type CaptureResult<T> = Result<T, CaptureError>;
