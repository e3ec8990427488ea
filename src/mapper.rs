//! Coordinate mapper.
//!
//! Converts selection rectangles drawn in logical screen coordinates into
//! physical-pixel regions of a capture buffer. Two addressing modes exist:
//! per-screen (one overlay window per monitor, region relative to that
//! monitor's buffer) and virtual (one overlay spanning all monitors, region
//! relative to the virtual desktop buffer).
//!
//! The mapping must be exact at monitor edges: a selection drawn flush with a
//! screen edge has to crop exactly to that edge in the physical buffer, or
//! the user sees a one-pixel border of the neighboring content.

use crate::geometry::Rect;
use crate::matcher::ScreenMapping;

/// A selection gesture's two corner points in global logical coordinates.
///
/// Ephemeral: lives only for the duration of one capture gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub origin: (i32, i32),
    pub current: (i32, i32),
}

impl SelectionRect {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            origin: (x, y),
            current: (x, y),
        }
    }

    pub fn update(&mut self, x: i32, y: i32) {
        self.current = (x, y);
    }

    /// Normalized rectangle (non-negative width/height).
    pub fn normalized(&self) -> Rect {
        Rect::from_points(self.origin.0, self.origin.1, self.current.0, self.current.1)
    }
}

/// A rectangle in physical pixel space, relative to a capture buffer.
///
/// Always at least 1x1: degenerate regions are clamped rather than produced,
/// so downstream crops never see a zero-area rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalRegion {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl PhysicalRegion {
    #[inline]
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

/// Clamp a mapped span into `[0, limit]`, keeping it at least one pixel wide.
fn clamp_span(a: i32, b: i32, limit: i32) -> (i32, i32) {
    let mut lo = a.min(b).max(0);
    let mut hi = a.max(b).min(limit);
    if hi <= lo {
        // Degenerate or fully outside: pin a 1px span at the nearest edge.
        hi = (lo + 1).min(limit.max(1));
        lo = hi - 1;
    }
    (lo, hi - lo)
}

/// Per-screen mode: map a logical selection through one screen's mapping.
///
/// Each coordinate is clamped into the screen's own bounds before scaling, so
/// the result always lies within `[0, monitor.width] x [0, monitor.height]`
/// and is relative to that monitor's capture buffer.
pub fn map_to_monitor(mapping: &ScreenMapping, selection: Rect) -> PhysicalRegion {
    let screen = mapping.screen.geometry;
    let monitor = mapping.monitor.rect;

    let x1 = (selection.left - screen.left).clamp(0, screen.width);
    let x2 = (selection.right() - screen.left).clamp(0, screen.width);
    let y1 = (selection.top - screen.top).clamp(0, screen.height);
    let y2 = (selection.bottom() - screen.top).clamp(0, screen.height);

    let px1 = (x1 as f64 * mapping.scale_x).round() as i32;
    let px2 = (x2 as f64 * mapping.scale_x).round() as i32;
    let py1 = (y1 as f64 * mapping.scale_y).round() as i32;
    let py2 = (y2 as f64 * mapping.scale_y).round() as i32;

    let (left, width) = clamp_span(px1, px2, monitor.width);
    let (top, height) = clamp_span(py1, py2, monitor.height);

    PhysicalRegion {
        left,
        top,
        width,
        height,
    }
}

/// Virtual mode: one overlay spanning the union of all logical screens.
///
/// A drag may cross monitor boundaries, so the two corner points are mapped
/// independently through whichever screen each one falls on.
#[derive(Debug, Clone)]
pub struct VirtualDesktop {
    mappings: Vec<ScreenMapping>,
    /// Device-pixel union of all monitors; its origin is the physical origin
    /// of the capture buffer's top-left monitor.
    bounds: Rect,
}

impl VirtualDesktop {
    /// Build from the session's screen mappings. Returns `None` when there
    /// are no mappings (no overlay can span zero screens).
    pub fn new(mappings: Vec<ScreenMapping>) -> Option<Self> {
        let mut iter = mappings.iter();
        let first = iter.next()?.monitor.rect;
        let bounds = iter.fold(first, |acc, m| acc.union(&m.monitor.rect));
        Some(Self { mappings, bounds })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The screen containing the point, or the nearest one by rectangular
    /// distance (zero inside, else Euclidean distance to the nearest
    /// edge/corner). Ties break to enumeration order.
    fn resolve(&self, x: i32, y: i32) -> &ScreenMapping {
        if let Some(mapping) = self
            .mappings
            .iter()
            .find(|m| m.screen.geometry.contains(x, y))
        {
            return mapping;
        }

        let mut best = &self.mappings[0];
        let mut best_distance = f64::INFINITY;
        for mapping in &self.mappings {
            let d = mapping.screen.geometry.distance_to_point(x, y);
            if d < best_distance {
                best_distance = d;
                best = mapping;
            }
        }
        best
    }

    /// Map one logical corner point to absolute device coordinates.
    fn map_point(&self, x: i32, y: i32) -> (i32, i32) {
        let mapping = self.resolve(x, y);
        let screen = mapping.screen.geometry;
        let monitor = mapping.monitor.rect;

        let rel_x = (x - screen.left).clamp(0, screen.width);
        let rel_y = (y - screen.top).clamp(0, screen.height);

        (
            monitor.left + (rel_x as f64 * mapping.scale_x).round() as i32,
            monitor.top + (rel_y as f64 * mapping.scale_y).round() as i32,
        )
    }

    /// Map a selection to a region of the virtual capture buffer.
    ///
    /// Both corners are mapped independently, the axis-aligned bounding box
    /// of the mapped points is taken, and the result is offset so coordinates
    /// are relative to the captured buffer rather than absolute device space.
    pub fn map_selection(&self, selection: &SelectionRect) -> PhysicalRegion {
        let (x1, y1) = self.map_point(selection.origin.0, selection.origin.1);
        let (x2, y2) = self.map_point(selection.current.0, selection.current.1);

        let (left, width) = clamp_span(
            x1 - self.bounds.left,
            x2 - self.bounds.left,
            self.bounds.width,
        );
        let (top, height) = clamp_span(
            y1 - self.bounds.top,
            y2 - self.bounds.top,
            self.bounds.height,
        );

        PhysicalRegion {
            left,
            top,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionRect, VirtualDesktop, map_to_monitor};
    use crate::geometry::Rect;
    use crate::matcher::{LogicalScreen, match_screens};
    use crate::monitor::Monitor;

    fn mapping_for(
        logical: Rect,
        dpr: f64,
        monitor: Rect,
        index: usize,
    ) -> crate::matcher::ScreenMapping {
        let monitors = [Monitor {
            index,
            rect: monitor,
        }];
        let screens = [LogicalScreen::new(logical, dpr)];
        match_screens(&screens, &monitors).unwrap()[0]
    }

    #[test]
    fn full_screen_selection_maps_to_full_monitor() {
        let mapping = mapping_for(
            Rect::new(1920, 0, 1280, 720),
            1.5,
            Rect::new(2880, 0, 1920, 1080),
            1,
        );

        let region = map_to_monitor(&mapping, Rect::new(1920, 0, 1280, 720));
        assert_eq!((region.left, region.top), (0, 0));
        assert_eq!((region.width, region.height), (1920, 1080));
    }

    #[test]
    fn selection_is_clamped_to_screen_bounds() {
        let mapping = mapping_for(Rect::new(0, 0, 1920, 1080), 1.0, Rect::new(0, 0, 1920, 1080), 0);

        // Fast drag overshooting the screen on all sides.
        let region = map_to_monitor(&mapping, Rect::from_points(-400, -300, 2400, 1500));
        assert_eq!((region.left, region.top), (0, 0));
        assert_eq!((region.width, region.height), (1920, 1080));
    }

    #[test]
    fn selection_fully_outside_yields_minimal_in_bounds_region() {
        let mapping = mapping_for(Rect::new(0, 0, 1920, 1080), 1.0, Rect::new(0, 0, 1920, 1080), 0);

        let region = map_to_monitor(&mapping, Rect::from_points(-500, -400, -100, -50));
        assert!(region.width >= 1 && region.height >= 1);
        assert!(region.left >= 0 && region.top >= 0);
        assert!(region.right() <= 1920 && region.bottom() <= 1080);

        let region = map_to_monitor(&mapping, Rect::from_points(3000, 2000, 3100, 2100));
        assert!(region.width >= 1 && region.height >= 1);
        assert!(region.right() <= 1920 && region.bottom() <= 1080);
    }

    #[test]
    fn dpi_scaled_selection_scales_into_device_pixels() {
        let mapping = mapping_for(Rect::new(0, 0, 1280, 720), 1.5, Rect::new(0, 0, 1920, 1080), 0);

        let region = map_to_monitor(&mapping, Rect::new(100, 100, 200, 100));
        assert_eq!((region.left, region.top), (150, 150));
        assert_eq!((region.width, region.height), (300, 150));
    }

    fn dual_virtual() -> VirtualDesktop {
        let monitors = [
            Monitor {
                index: 0,
                rect: Rect::new(0, 0, 1920, 1080),
            },
            Monitor {
                index: 1,
                rect: Rect::new(1920, 0, 1920, 1080),
            },
        ];
        let screens = [
            LogicalScreen::new(Rect::new(0, 0, 1920, 1080), 1.0),
            LogicalScreen::new(Rect::new(1920, 0, 1920, 1080), 1.0),
        ];
        VirtualDesktop::new(match_screens(&screens, &monitors).unwrap()).unwrap()
    }

    #[test]
    fn cross_monitor_drag_spans_both_portions_without_gap() {
        let desktop = dual_virtual();

        let mut selection = SelectionRect::new(1000, 100);
        selection.update(2500, 900);
        let region = desktop.map_selection(&selection);

        // 920px on the left monitor + 580px on the right one.
        assert_eq!(region.left, 1000);
        assert_eq!(region.width, 920 + 580);
        assert_eq!((region.top, region.height), (100, 800));
    }

    #[test]
    fn reversed_drag_maps_to_the_same_region() {
        let desktop = dual_virtual();

        let mut forward = SelectionRect::new(1000, 100);
        forward.update(2500, 900);
        let mut backward = SelectionRect::new(2500, 900);
        backward.update(1000, 100);

        assert_eq!(
            desktop.map_selection(&forward),
            desktop.map_selection(&backward)
        );
    }

    #[test]
    fn point_between_screens_resolves_to_nearest() {
        // Vertically stacked monitors with a seam gap in logical space.
        let monitors = [
            Monitor {
                index: 0,
                rect: Rect::new(0, 0, 1920, 1080),
            },
            Monitor {
                index: 1,
                rect: Rect::new(0, 1200, 1920, 1080),
            },
        ];
        let screens = [
            LogicalScreen::new(Rect::new(0, 0, 1920, 1080), 1.0),
            LogicalScreen::new(Rect::new(0, 1200, 1920, 1080), 1.0),
        ];
        let desktop =
            VirtualDesktop::new(match_screens(&screens, &monitors).unwrap()).unwrap();

        // A corner in the seam (y = 1150) is closer to the lower screen.
        let mut selection = SelectionRect::new(100, 1150);
        selection.update(500, 1500);
        let region = desktop.map_selection(&selection);

        // The seam corner clamps onto the lower screen's top edge.
        assert_eq!(region.top, 1200);
        assert_eq!(region.bottom(), 1500);
    }

    #[test]
    fn virtual_region_is_buffer_relative_with_offset_origin() {
        // Virtual desktop whose top-left monitor sits at negative device
        // coordinates (secondary monitor left of primary).
        let monitors = [
            Monitor {
                index: 0,
                rect: Rect::new(-1920, 0, 1920, 1080),
            },
            Monitor {
                index: 1,
                rect: Rect::new(0, 0, 1920, 1080),
            },
        ];
        let screens = [
            LogicalScreen::new(Rect::new(-1920, 0, 1920, 1080), 1.0),
            LogicalScreen::new(Rect::new(0, 0, 1920, 1080), 1.0),
        ];
        let desktop =
            VirtualDesktop::new(match_screens(&screens, &monitors).unwrap()).unwrap();

        let mut selection = SelectionRect::new(-100, 10);
        selection.update(100, 110);
        let region = desktop.map_selection(&selection);

        assert_eq!(region.left, 1820);
        assert_eq!(region.width, 200);
        assert_eq!(region.top, 10);
    }

    #[test]
    fn degenerate_selection_still_yields_one_pixel_region() {
        let desktop = dual_virtual();
        let selection = SelectionRect::new(500, 500);
        let region = desktop.map_selection(&selection);
        assert_eq!((region.width, region.height), (1, 1));
    }
}
