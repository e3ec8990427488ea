//! snipcap: screen-capture coordinate core.
//!
//! Multi-monitor logical-to-physical coordinate mapping for region selection,
//! antialiased selection masks, and OCR word alignment onto a displayed
//! canvas. The GUI shell, clipboard, file dialogs and the OCR engine itself
//! are external collaborators.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod image_ops;
pub mod mapper;
pub mod mask;
pub mod matcher;
pub mod monitor;
pub mod ocr;
pub mod platform;
pub mod session;
pub mod settings;

// Re-export the main types.
pub use error::{CaptureError, CaptureResult, MatchError, MonitorError, OcrError};
pub use geometry::{Rect, RectF, Shape};
pub use mapper::{PhysicalRegion, SelectionRect, VirtualDesktop, map_to_monitor};
pub use matcher::{LogicalScreen, ScreenMapping, match_screens};
pub use monitor::{Monitor, MonitorRegistry};
pub use ocr::{OcrWord, OcrWorker, RawWord, WordOverlay, collect_words};
pub use session::{CaptureMode, CaptureSession};
pub use settings::Settings;
