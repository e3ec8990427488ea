//! Logical screen matcher.
//!
//! Associates each OS-reported logical display surface (which may apply
//! per-monitor DPI scaling) with the physical monitor it lives on, and
//! derives the logical-to-physical scale factors used by the mapper.

use tracing::{debug, warn};

use crate::error::MatchError;
use crate::geometry::Rect;
use crate::monitor::Monitor;

/// An OS-reported display surface in logical coordinates.
///
/// `geometry` may be smaller than the monitor's pixel geometry when DPI
/// scaling is active; `device_pixel_ratio` is the OS's scale hint for the
/// surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalScreen {
    pub geometry: Rect,
    pub device_pixel_ratio: f64,
}

impl LogicalScreen {
    pub fn new(geometry: Rect, device_pixel_ratio: f64) -> Self {
        Self {
            geometry,
            device_pixel_ratio,
        }
    }

    /// The screen's geometry scaled by its device pixel ratio: the best
    /// estimate of its device-pixel footprint before matching.
    fn device_estimate(&self) -> Rect {
        let dpr = self.device_pixel_ratio;
        Rect {
            left: (self.geometry.left as f64 * dpr).round() as i32,
            top: (self.geometry.top as f64 * dpr).round() as i32,
            width: (self.geometry.width as f64 * dpr).round() as i32,
            height: (self.geometry.height as f64 * dpr).round() as i32,
        }
    }
}

/// A logical screen paired with its physical monitor.
///
/// Recomputed whenever an overlay session starts; monitors may change between
/// sessions, never during one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    pub screen: LogicalScreen,
    pub monitor: Monitor,
    /// `monitor.width / logical.width` (and the same for y): multiplying a
    /// screen-relative logical offset by this yields device pixels.
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ScreenMapping {
    fn new(screen: LogicalScreen, monitor: Monitor) -> Self {
        let scale_x = monitor.rect.width as f64 / screen.geometry.width.max(1) as f64;
        let scale_y = monitor.rect.height as f64 / screen.geometry.height.max(1) as f64;
        Self {
            screen,
            monitor,
            scale_x,
            scale_y,
        }
    }
}

/// Match every logical screen to exactly one physical monitor.
///
/// Exact geometry match first; when DPI scaling changes the logical
/// dimensions, fall back to the monitor with the largest device-rect overlap.
/// Ties break to the first monitor in enumeration order, so the result is
/// deterministic given a stable enumeration.
pub fn match_screens(
    screens: &[LogicalScreen],
    monitors: &[Monitor],
) -> Result<Vec<ScreenMapping>, MatchError> {
    screens
        .iter()
        .map(|screen| match_one(screen, monitors))
        .collect()
}

fn match_one(screen: &LogicalScreen, monitors: &[Monitor]) -> Result<ScreenMapping, MatchError> {
    let target = screen.device_estimate();

    if let Some(monitor) = monitors.iter().find(|m| m.rect == target) {
        return Ok(ScreenMapping::new(*screen, *monitor));
    }

    let mut best: Option<(&Monitor, i64)> = None;
    for monitor in monitors {
        let area = monitor.rect.intersection_area(&target);
        if area > best.map_or(0, |(_, a)| a) {
            best = Some((monitor, area));
        }
    }

    match best {
        Some((monitor, area)) => {
            debug!(
                monitor = monitor.index,
                overlap = area,
                "no exact geometry match, picked monitor by overlap"
            );
            Ok(ScreenMapping::new(*screen, *monitor))
        }
        None => {
            warn!(
                left = screen.geometry.left,
                top = screen.geometry.top,
                "logical screen overlaps no monitor"
            );
            Err(MatchError::NoMatch {
                left: screen.geometry.left,
                top: screen.geometry.top,
                width: screen.geometry.width,
                height: screen.geometry.height,
            })
        }
    }
}
