//! End-to-end pipeline tests over an in-memory capture backend:
//! registry -> matcher -> session -> mapper -> crop -> cut-out.

use snipcap::image_ops::{buffer_to_rgba, crop_region, cut_out};
use snipcap::ocr::{RawWord, WordOverlay, collect_words};
use snipcap::{
    CaptureSession, LogicalScreen, MonitorRegistry, Rect, RectF, Shape, match_screens,
};
use snipcap::platform::{CaptureBuffer, ScreenBackend};

/// Backend with two side-by-side 1920x1080 monitors. The captured pixels
/// encode their own device coordinates so crops can be verified exactly.
struct TestBackend;

const MON_W: i32 = 1920;
const MON_H: i32 = 1080;

impl ScreenBackend for TestBackend {
    fn screens(&mut self) -> anyhow::Result<Vec<Rect>> {
        Ok(vec![
            Rect::new(0, 0, MON_W * 2, MON_H),
            Rect::new(0, 0, MON_W, MON_H),
            Rect::new(MON_W, 0, MON_W, MON_H),
        ])
    }

    fn capture(&mut self, rect: Rect) -> anyhow::Result<CaptureBuffer> {
        let mut data = Vec::with_capacity((rect.width * rect.height * 4) as usize);
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                // B, G encode the absolute device position.
                data.push((x % 251) as u8);
                data.push((y % 251) as u8);
                data.push(0);
                data.push(0);
            }
        }
        Ok(CaptureBuffer {
            width: rect.width as u32,
            height: rect.height as u32,
            data,
        })
    }
}

fn logical_screens() -> Vec<LogicalScreen> {
    vec![
        LogicalScreen::new(Rect::new(0, 0, MON_W, MON_H), 1.0),
        LogicalScreen::new(Rect::new(MON_W, 0, MON_W, MON_H), 1.0),
    ]
}

#[test]
fn per_screen_capture_crops_to_exact_monitor_edge() {
    let registry = MonitorRegistry::new(Box::new(TestBackend));
    let monitors = registry.enumerate().unwrap();
    let mappings = match_screens(&logical_screens(), &monitors).unwrap();

    // Drag flush against the right monitor's right edge.
    let mut session = CaptureSession::per_screen(mappings[1], Shape::Rectangle);
    session.press(MON_W + 1800, 100);
    session.drag(MON_W * 2, 400);
    let region = session.release(MON_W * 2, 400).unwrap();

    assert_eq!(region.left, 1800);
    assert_eq!(region.right(), MON_W);

    let buffer = registry.capture_monitor(&monitors[1]).unwrap();
    let image = buffer_to_rgba(&buffer).unwrap();
    let cropped = crop_region(&image, &region);
    assert_eq!(cropped.dimensions(), (120, 300));

    // Rightmost cropped column carries the monitor's rightmost device x.
    let px = cropped.get_pixel(119, 0);
    assert_eq!(px.0[2], (((MON_W * 2 - 1) % 251) as u8));
}

#[test]
fn virtual_capture_spans_the_monitor_boundary_seamlessly() {
    let registry = MonitorRegistry::new(Box::new(TestBackend));
    let monitors = registry.enumerate().unwrap();
    let mappings = match_screens(&logical_screens(), &monitors).unwrap();

    let mut session = CaptureSession::virtual_desktop(mappings, Shape::Rectangle).unwrap();
    session.press(MON_W - 100, 200);
    session.drag(MON_W + 100, 500);
    let region = session.release(MON_W + 100, 500).unwrap();

    assert_eq!(region.left, MON_W - 100);
    assert_eq!(region.width, 200);

    let buffer = registry.capture_virtual().unwrap();
    let image = buffer_to_rgba(&buffer).unwrap();
    let cropped = crop_region(&image, &region);
    assert_eq!(cropped.dimensions(), (200, 300));

    // Pixels on both sides of the seam are adjacent in the crop.
    let left_of_seam = cropped.get_pixel(99, 0);
    let right_of_seam = cropped.get_pixel(100, 0);
    assert_eq!(left_of_seam.0[2], (((MON_W - 1) % 251) as u8));
    assert_eq!(right_of_seam.0[2], ((MON_W % 251) as u8));
}

#[test]
fn ellipse_capture_produces_shaped_cut_out() {
    let registry = MonitorRegistry::new(Box::new(TestBackend));
    let monitors = registry.enumerate().unwrap();
    let mappings = match_screens(&logical_screens(), &monitors).unwrap();

    let mut session = CaptureSession::per_screen(mappings[0], Shape::Ellipse);
    session.press(100, 100);
    let region = session.release(300, 300).unwrap();

    let buffer = registry.capture_monitor(&monitors[0]).unwrap();
    let image = buffer_to_rgba(&buffer).unwrap();
    let cut = cut_out(&crop_region(&image, &region), session.shape());

    assert_eq!(cut.dimensions(), (200, 200));
    assert_eq!(cut.get_pixel(100, 100).0[3], 255);
    assert_eq!(cut.get_pixel(0, 0).0[3], 0);
}

#[test]
fn recognized_words_align_onto_the_cropped_canvas() {
    let raw = vec![
        RawWord {
            text: "Status:".to_string(),
            left: 20,
            top: 30,
            width: 70,
            height: 16,
            block_num: 1,
            par_num: 1,
            line_num: 1,
            word_num: 1,
            confidence: 93.0,
        },
        RawWord {
            text: "ready".to_string(),
            left: 100,
            top: 31,
            width: 50,
            height: 15,
            block_num: 1,
            par_num: 1,
            line_num: 1,
            word_num: 2,
            confidence: 88.0,
        },
    ];
    let words = collect_words(raw, 0.0);

    // Source crop is 200x100, displayed at 2x on a canvas at (40, 25).
    let mut overlay = WordOverlay::apply(&words, (200, 100), RectF::new(40.0, 25.0, 400.0, 200.0));
    assert_eq!(overlay.len(), 2);

    let first = overlay.items()[0].rect;
    assert_eq!(first.x, 40.0 + 40.0);
    assert_eq!(first.width, 140.0);

    overlay.select_rect(RectF::new(0.0, 0.0, 500.0, 250.0));
    assert_eq!(overlay.selected_text(), "Status: ready");
}
