// Interaction and rendering constants shared across the crate.

/// Drags at or below this size (logical pixels, either dimension) are
/// discarded as accidental.
pub const MIN_SELECTION_SIZE: i32 = 5;

/// Hit radius (canvas pixels) for near-miss word selection by point.
pub const WORD_HIT_RADIUS: f32 = 8.0;

/// Vertical padding added to each side of an OCR line's extent, as a
/// fraction of the line height. Gives overlay boxes comfortable click
/// targets instead of tight text-height boxes.
pub const LINE_PAD_RATIO: f32 = 0.08;

/// Fraction of a word box's own area that must be covered by a drag
/// rectangle for the word to be selected.
pub const RECT_SELECT_COVERAGE: f32 = 0.20;

/// Corner radius of the rectangle cut-out mask: `max(CORNER_RADIUS_MIN,
/// min(w, h) * CORNER_RADIUS_RATIO)`.
pub const CORNER_RADIUS_MIN: f32 = 4.0;
pub const CORNER_RADIUS_RATIO: f32 = 0.04;

/// How far (pixels) the mask shape is extended beyond the buffer on straight
/// edges, so edges stay fully opaque up to the boundary.
pub const MASK_EDGE_BLEED: f32 = 1.0;

/// Default Gaussian blur radius for the dimmed overlay backdrop.
pub const DEFAULT_BLUR_RADIUS: u32 = 6;

/// OCR word records below this confidence are dropped at ingestion.
pub const DEFAULT_MIN_OCR_CONFIDENCE: f32 = 0.0;
