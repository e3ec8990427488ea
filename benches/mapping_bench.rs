//! Coordinate mapping and mask building benchmarks.
//!
//! Run: `cargo bench --bench mapping_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use snipcap::ocr::{BoundingBox, OcrWord, WordOverlay};
use snipcap::{
    LogicalScreen, Monitor, Rect, RectF, SelectionRect, Shape, VirtualDesktop, match_screens,
};

fn dual_mappings() -> Vec<snipcap::ScreenMapping> {
    let monitors = [
        Monitor {
            index: 0,
            rect: Rect::new(0, 0, 2560, 1440),
        },
        Monitor {
            index: 1,
            rect: Rect::new(2560, 0, 1920, 1080),
        },
    ];
    let screens = [
        LogicalScreen::new(Rect::new(0, 0, 1707, 960), 1.5),
        LogicalScreen::new(Rect::new(1707, 0, 1920, 1080), 1.0),
    ];
    match_screens(&screens, &monitors).unwrap()
}

fn bench_matching(c: &mut Criterion) {
    let monitors: Vec<Monitor> = (0..4)
        .map(|i| Monitor {
            index: i,
            rect: Rect::new(i as i32 * 1920, 0, 1920, 1080),
        })
        .collect();
    let screens: Vec<LogicalScreen> = (0..4)
        .map(|i| LogicalScreen::new(Rect::new(i * 1920, 0, 1920, 1080), 1.0))
        .collect();

    c.bench_function("match_screens/4_monitors", |b| {
        b.iter(|| match_screens(black_box(&screens), black_box(&monitors)).unwrap());
    });
}

fn bench_virtual_mapping(c: &mut Criterion) {
    let desktop = VirtualDesktop::new(dual_mappings()).unwrap();

    c.bench_function("virtual_map/cross_monitor_drag", |b| {
        let mut selection = SelectionRect::new(1200, 300);
        selection.update(2400, 900);
        b.iter(|| black_box(desktop.map_selection(black_box(&selection))));
    });
}

fn bench_mask_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_mask");
    for size in [128u32, 512, 1024] {
        group.bench_with_input(BenchmarkId::new("ellipse", size), &size, |b, &s| {
            b.iter(|| snipcap::mask::build_mask(s, s, Shape::Ellipse).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("rounded_rect", size), &size, |b, &s| {
            b.iter(|| snipcap::mask::build_mask(s, s, Shape::Rectangle).unwrap());
        });
    }
    group.finish();
}

fn bench_overlay_selection(c: &mut Criterion) {
    // 40 lines x 12 words.
    let words: Vec<OcrWord> = (0..40u32)
        .flat_map(|line| {
            (0..12u32).map(move |w| OcrWord {
                text: format!("word{w}"),
                bbox: BoundingBox {
                    x: (w * 100) as i32,
                    y: (line * 30) as i32,
                    width: 90,
                    height: 20,
                },
                line_id: (1, 1, line),
                word_num: w,
            })
        })
        .collect();
    let mut overlay = WordOverlay::apply(&words, (1280, 1200), RectF::new(0.0, 0.0, 1280.0, 1200.0));

    c.bench_function("overlay/select_rect_480_words", |b| {
        b.iter(|| overlay.select_rect(black_box(RectF::new(50.0, 50.0, 900.0, 700.0))));
    });

    overlay.select_rect(RectF::new(0.0, 0.0, 1280.0, 1200.0));
    c.bench_function("overlay/selected_text_480_words", |b| {
        b.iter(|| black_box(overlay.selected_text()));
    });
}

criterion_group!(
    benches,
    bench_matching,
    bench_virtual_mapping,
    bench_mask_building,
    bench_overlay_selection
);
criterion_main!(benches);
