//! Capture session.
//!
//! One explicit session object per capture gesture, owned by the capture
//! controller: created when the overlay opens, fed raw press/drag/release
//! input, and discarded on completion or cancel. Screen mappings are fixed at
//! session start; monitors may change between sessions, never during one.

use tracing::debug;

use crate::constants::MIN_SELECTION_SIZE;
use crate::geometry::{Rect, Shape};
use crate::mapper::{PhysicalRegion, SelectionRect, VirtualDesktop, map_to_monitor};
use crate::matcher::ScreenMapping;

/// Addressing mode for one capture session.
#[derive(Debug, Clone)]
pub enum CaptureMode {
    /// One overlay window per physical screen; selections map through that
    /// screen's mapping only.
    PerScreen(ScreenMapping),
    /// One overlay spanning the union of all logical screens; a drag may
    /// cross monitor boundaries.
    Virtual(VirtualDesktop),
}

#[derive(Debug, Clone, Copy, Default)]
enum Gesture {
    #[default]
    Idle,
    Dragging(SelectionRect),
}

/// State for one interactive selection gesture.
#[derive(Debug)]
pub struct CaptureSession {
    mode: CaptureMode,
    gesture: Gesture,
    shape: Shape,
}

impl CaptureSession {
    pub fn per_screen(mapping: ScreenMapping, shape: Shape) -> Self {
        Self {
            mode: CaptureMode::PerScreen(mapping),
            gesture: Gesture::Idle,
            shape,
        }
    }

    /// Returns `None` when `mappings` is empty: a virtual overlay cannot
    /// span zero screens.
    pub fn virtual_desktop(mappings: Vec<ScreenMapping>, shape: Shape) -> Option<Self> {
        Some(Self {
            mode: CaptureMode::Virtual(VirtualDesktop::new(mappings)?),
            gesture: Gesture::Idle,
            shape,
        })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Space-key toggle between rectangle and ellipse cut-out.
    pub fn toggle_shape(&mut self) {
        self.shape = self.shape.toggled();
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging(_))
    }

    /// Current in-progress selection, normalized, for overlay painting.
    pub fn selection(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging(sel) => Some(sel.normalized()),
        }
    }

    /// Mouse press in global logical coordinates: begins a drag.
    pub fn press(&mut self, x: i32, y: i32) {
        self.gesture = Gesture::Dragging(SelectionRect::new(x, y));
    }

    /// Mouse move: updates the drag, returning the live rectangle.
    pub fn drag(&mut self, x: i32, y: i32) -> Option<Rect> {
        if let Gesture::Dragging(sel) = &mut self.gesture {
            sel.update(x, y);
            Some(sel.normalized())
        } else {
            None
        }
    }

    /// Mouse release: completes the gesture.
    ///
    /// Tiny accidental drags (at most 5 logical pixels in either dimension)
    /// are silently discarded as "no selection". No mapping happens until
    /// this point, so a cancelled or degenerate gesture leaks no state.
    pub fn release(&mut self, x: i32, y: i32) -> Option<PhysicalRegion> {
        let Gesture::Dragging(mut sel) = self.gesture else {
            return None;
        };
        self.gesture = Gesture::Idle;

        sel.update(x, y);
        let rect = sel.normalized();
        if rect.width <= MIN_SELECTION_SIZE || rect.height <= MIN_SELECTION_SIZE {
            debug!(
                width = rect.width,
                height = rect.height,
                "discarding degenerate selection"
            );
            return None;
        }

        let region = match &self.mode {
            CaptureMode::PerScreen(mapping) => map_to_monitor(mapping, rect),
            CaptureMode::Virtual(desktop) => desktop.map_selection(&sel),
        };
        debug!(?region, "selection mapped");
        Some(region)
    }

    /// Escape / click-outside: discard the in-progress gesture.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }
}
