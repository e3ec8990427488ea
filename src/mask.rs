//! Selection mask builder.
//!
//! Naive polygon rasterization produces hard-edged selections, so the mask is
//! rendered at 1:1 resolution with antialiasing. On straight edges the shape
//! is extended one unit past the buffer so the edge stays fully opaque to the
//! boundary; rounded corners and the ellipse boundary keep their natural
//! antialiased falloff.

use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use crate::constants::{CORNER_RADIUS_MIN, CORNER_RADIUS_RATIO, MASK_EDGE_BLEED};
use crate::geometry::Shape;

/// Cubic Bezier circle-arc approximation constant.
const ARC_K: f32 = 0.552_284_75;

/// Build a single-channel alpha mask for a `width x height` cut-out.
///
/// The buffer is 8-bit grayscale, row-major, usable directly as an alpha
/// channel. Returns `None` for zero-sized dimensions, which callers treat as
/// "no cut-out" rather than an error.
pub fn build_mask(width: u32, height: u32, shape: Shape) -> Option<Vec<u8>> {
    let mut pixmap = Pixmap::new(width, height)?;

    let path = match shape {
        Shape::Ellipse => {
            let oval = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32)?;
            PathBuilder::from_oval(oval)?
        }
        Shape::Rectangle => {
            // Corner radius tracks the smaller dimension so small cut-outs
            // stay visibly rounded and large ones don't look pill-shaped.
            let radius =
                (width.min(height) as f32 * CORNER_RADIUS_RATIO).max(CORNER_RADIUS_MIN);
            rounded_rect_path(
                -MASK_EDGE_BLEED,
                -MASK_EDGE_BLEED,
                width as f32 + 2.0 * MASK_EDGE_BLEED,
                height as f32 + 2.0 * MASK_EDGE_BLEED,
                radius,
            )?
        }
    };

    let mut paint = Paint::default();
    paint.set_color(Color::WHITE);
    paint.anti_alias = true;

    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    Some(pixmap.pixels().iter().map(|p| p.alpha()).collect())
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    let r = radius.min(w / 2.0).min(h / 2.0);
    let c = r * ARC_K;
    let right = x + w;
    let bottom = y + h;

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + c, y, right, y + r - c, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + c, right - r + c, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - c, bottom, x, bottom - r + c, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - c, x + r - c, y, x + r, y);
    pb.close();
    pb.finish()
}
