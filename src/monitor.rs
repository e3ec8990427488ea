//! Monitor registry.
//!
//! Enumerates physical display devices in raw device pixels, independent of
//! OS logical/DPI scaling, and owns the capture backend session for the
//! lifetime of the app run.

use parking_lot::Mutex;
use tracing::debug;

use crate::error::MonitorError;
use crate::geometry::Rect;
use crate::platform::{CaptureBuffer, ScreenBackend};

/// A physical display in raw device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    /// Position in the backend's enumeration order (0-based, virtual entry
    /// excluded).
    pub index: usize,
    pub rect: Rect,
}

/// Owns the capture backend and produces [`Monitor`] lists on demand.
///
/// The backend handle is opened once and reused across enumerations; the
/// backend returns live geometry on each call, so monitors changing between
/// capture sessions are picked up by the next `enumerate()`.
pub struct MonitorRegistry {
    backend: Mutex<Box<dyn ScreenBackend>>,
}

impl MonitorRegistry {
    pub fn new(backend: Box<dyn ScreenBackend>) -> Self {
        Self {
            backend: Mutex::new(backend),
        }
    }

    /// Enumerate physical monitors.
    ///
    /// The backend's entry 0 is the virtual pseudo-display spanning all
    /// monitors; only the real physical entries are kept.
    pub fn enumerate(&self) -> Result<Vec<Monitor>, MonitorError> {
        let screens = self
            .backend
            .lock()
            .screens()
            .map_err(|e| MonitorError::Enumeration(e.to_string()))?;

        if screens.len() < 2 {
            return Err(MonitorError::NoMonitors);
        }

        let monitors: Vec<Monitor> = screens[1..]
            .iter()
            .enumerate()
            .map(|(index, rect)| Monitor { index, rect: *rect })
            .collect();

        debug!(count = monitors.len(), "enumerated physical monitors");
        Ok(monitors)
    }

    /// Device-pixel bounds of the virtual desktop (the backend's entry 0).
    pub fn virtual_bounds(&self) -> Result<Rect, MonitorError> {
        let screens = self
            .backend
            .lock()
            .screens()
            .map_err(|e| MonitorError::Enumeration(e.to_string()))?;
        screens.first().copied().ok_or(MonitorError::NoMonitors)
    }

    /// Capture one monitor's pixels.
    pub fn capture_monitor(&self, monitor: &Monitor) -> Result<CaptureBuffer, MonitorError> {
        self.backend
            .lock()
            .capture(monitor.rect)
            .map_err(|e| MonitorError::Capture(e.to_string()))
    }

    /// Capture the whole virtual desktop.
    pub fn capture_virtual(&self) -> Result<CaptureBuffer, MonitorError> {
        let bounds = self.virtual_bounds()?;
        self.backend
            .lock()
            .capture(bounds)
            .map_err(|e| MonitorError::Capture(e.to_string()))
    }
}
