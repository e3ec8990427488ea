//! Capture backend abstraction.
//!
//! The monitor registry and capture paths talk to the OS through
//! [`ScreenBackend`], so the coordinate core stays platform-neutral and
//! testable with an in-memory backend.

use anyhow::Result;

use crate::geometry::Rect;

#[cfg(windows)]
pub mod windows;

#[cfg(windows)]
pub use windows::GdiBackend;

/// Raw pixels captured from the screen.
///
/// `data` is 32-bit BGRA, row-major, top-down, `width * height * 4` bytes.
pub struct CaptureBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// A screen-capture backend session.
///
/// The backend is opened once and held for the lifetime of the registry; each
/// `screens()` call returns live geometry.
pub trait ScreenBackend: Send {
    /// Display list in device pixels.
    ///
    /// Entry 0 is the virtual pseudo-display spanning all monitors; the real
    /// physical displays follow in a stable enumeration order.
    fn screens(&mut self) -> Result<Vec<Rect>>;

    /// Capture the given device-pixel rectangle.
    fn capture(&mut self, rect: Rect) -> Result<CaptureBuffer>;
}
