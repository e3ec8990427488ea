//! Image utility functions.
//!
//! Capture-buffer conversion, region cropping and shaped cut-out. These are
//! decoupled from specific flows (clipboard, save, OCR) and shared by all of
//! them.

use image::RgbaImage;

use crate::geometry::Shape;
use crate::mapper::PhysicalRegion;
use crate::mask::build_mask;
use crate::platform::CaptureBuffer;

/// Convert a BGRA capture buffer to an RGBA image.
///
/// Capture backends leave the alpha byte undefined, so it is forced opaque.
pub fn buffer_to_rgba(buffer: &CaptureBuffer) -> Option<RgbaImage> {
    let expected = buffer.width as usize * buffer.height as usize * 4;
    if buffer.data.len() != expected {
        return None;
    }

    let mut data = buffer.data.clone();
    for px in data.chunks_exact_mut(4) {
        px.swap(0, 2);
        px[3] = 255;
    }
    RgbaImage::from_raw(buffer.width, buffer.height, data)
}

/// Crop a physical region out of a captured image.
///
/// The region is clamped into the image; an unusable region returns the
/// image unchanged so a capture in progress never fails on a crop.
pub fn crop_region(image: &RgbaImage, region: &PhysicalRegion) -> RgbaImage {
    let (img_w, img_h) = image.dimensions();

    let x = region.left.clamp(0, img_w.saturating_sub(1) as i32) as u32;
    let y = region.top.clamp(0, img_h.saturating_sub(1) as i32) as u32;
    let w = (region.width.max(1) as u32).min(img_w - x);
    let h = (region.height.max(1) as u32).min(img_h - y);

    if w == 0 || h == 0 {
        return image.clone();
    }

    image::imageops::crop_imm(image, x, y, w, h).to_image()
}

/// Apply the shaped selection mask to an image's alpha channel.
///
/// A zero-area image is returned uncut: a zero-area mask is meaningless but
/// must not break a capture in progress.
pub fn cut_out(image: &RgbaImage, shape: Shape) -> RgbaImage {
    let (w, h) = image.dimensions();
    let Some(mask) = build_mask(w, h, shape) else {
        return image.clone();
    };

    let mut out = image.clone();
    for (px, m) in out.pixels_mut().zip(mask) {
        px.0[3] = (px.0[3] as u16 * m as u16 / 255) as u8;
    }
    out
}
