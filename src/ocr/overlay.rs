//! OCR word alignment and interactive selection.
//!
//! Maps recognizer-reported word boxes (source-image pixel space) onto the
//! coordinate space of a displayed canvas item, producing selectable overlay
//! regions with padded, line-height click targets; reconstructs selected text
//! in reading order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::constants::{LINE_PAD_RATIO, RECT_SELECT_COVERAGE, WORD_HIT_RADIUS};
use crate::geometry::RectF;
use crate::ocr::types::{LineId, OcrWord};

/// One selectable region derived from one [`OcrWord`].
///
/// `rect` is in the canvas's item-local coordinate space. Created when OCR
/// results are applied, destroyed when the overlay is cleared or replaced.
#[derive(Debug, Clone)]
pub struct WordOverlayItem {
    pub word: OcrWord,
    pub rect: RectF,
    active: bool,
}

impl WordOverlayItem {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The interactive word overlay for one recognized image.
#[derive(Debug, Clone, Default)]
pub struct WordOverlay {
    items: Vec<WordOverlayItem>,
}

impl WordOverlay {
    /// Align recognized words onto the canvas rectangle.
    ///
    /// Words are grouped by line; every word's box takes its own horizontal
    /// extent but its line's vertical extent, padded by
    /// `max(1, line_height * 0.08)` per side (clamped to the image), so
    /// overlay boxes form comfortable click targets rather than tight
    /// text-height boxes. An empty word list yields an empty overlay.
    pub fn apply(words: &[OcrWord], source_size: (u32, u32), canvas: RectF) -> Self {
        let (src_w, src_h) = source_size;
        if words.is_empty() || src_w == 0 || src_h == 0 {
            return Self::default();
        }

        // Per-line vertical extent across all of the line's words.
        let mut lines: BTreeMap<LineId, (i32, i32)> = BTreeMap::new();
        for word in words {
            let top = word.bbox.y;
            let bottom = word.bbox.y + word.bbox.height;
            lines
                .entry(word.line_id)
                .and_modify(|(t, b)| {
                    *t = (*t).min(top);
                    *b = (*b).max(bottom);
                })
                .or_insert((top, bottom));
        }

        let padded: BTreeMap<LineId, (f32, f32)> = lines
            .into_iter()
            .map(|(id, (top, bottom))| {
                let pad = ((bottom - top) as f32 * LINE_PAD_RATIO).max(1.0);
                let top = (top as f32 - pad).max(0.0);
                let bottom = (bottom as f32 + pad).min(src_h as f32);
                (id, (top, bottom))
            })
            .collect();

        let scale_x = canvas.width / src_w as f32;
        let scale_y = canvas.height / src_h as f32;

        let items = words
            .iter()
            .map(|word| {
                let (line_top, line_bottom) = padded[&word.line_id];
                let rect = RectF::new(
                    canvas.x + word.bbox.x as f32 * scale_x,
                    canvas.y + line_top * scale_y,
                    word.bbox.width as f32 * scale_x,
                    (line_bottom - line_top) * scale_y,
                );
                WordOverlayItem {
                    word: word.clone(),
                    rect,
                    active: false,
                }
            })
            .collect::<Vec<_>>();

        debug!(words = items.len(), "aligned OCR overlay");
        Self { items }
    }

    pub fn items(&self) -> &[WordOverlayItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drop all overlay items (overlay cleared or a new recognition replaces
    /// it).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn clear_selection(&mut self) {
        for item in &mut self.items {
            item.active = false;
        }
    }

    pub fn has_selection(&self) -> bool {
        self.items.iter().any(|i| i.active)
    }

    /// Select the word at a point.
    ///
    /// Picks the containing box nearest by center (line padding makes
    /// neighboring boxes overlap), or the closest box within a small radius
    /// when the click lands just outside every box. Returns the selected
    /// item's index.
    pub fn select_point(&mut self, x: f32, y: f32) -> Option<usize> {
        self.clear_selection();

        let center_distance = |rect: &RectF| {
            let (cx, cy) = rect.center();
            let (dx, dy) = (cx - x, cy - y);
            dx * dx + dy * dy
        };

        let hit = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.rect.contains(x, y))
            .min_by(|(_, a), (_, b)| {
                center_distance(&a.rect).total_cmp(&center_distance(&b.rect))
            })
            .map(|(idx, _)| idx)
            .or_else(|| {
                self.items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| (idx, item.rect.distance_to_point(x, y)))
                    .filter(|(_, d)| *d <= WORD_HIT_RADIUS)
                    .min_by(|(_, a), (_, b)| a.total_cmp(b))
                    .map(|(idx, _)| idx)
            });

        if let Some(idx) = hit {
            self.items[idx].active = true;
        }
        hit
    }

    /// Select every word sufficiently covered by a drag rectangle.
    ///
    /// A word is selected when the overlap covers at least 20% of its own box
    /// area, or its box center lies inside the rectangle. Pure function of
    /// overlay state; repeated calls with the same rectangle select the same
    /// words. Returns the number of selected words.
    pub fn select_rect(&mut self, rect: RectF) -> usize {
        let mut count = 0;
        for item in &mut self.items {
            let own_area = item.rect.area();
            let overlap = item.rect.intersection_area(&rect);
            let (cx, cy) = item.rect.center();

            item.active = (own_area > 0.0 && overlap >= own_area * RECT_SELECT_COVERAGE)
                || rect.contains(cx, cy);
            if item.active {
                count += 1;
            }
        }
        count
    }

    /// Selected words in reading order.
    pub fn selected_words(&self) -> Vec<&OcrWord> {
        let mut words: Vec<&OcrWord> = self
            .items
            .iter()
            .filter(|i| i.active)
            .map(|i| &i.word)
            .collect();
        words.sort_by_key(|w| w.order_key());
        words
    }

    /// Reconstruct the selected text.
    ///
    /// Words are ordered by `(block, paragraph, line, word)`; words sharing a
    /// line are joined with a single space, a line change inserts a newline,
    /// then punctuation spacing is tidied. The index order is assumed to
    /// reflect reading order; multi-column layouts can defeat that, which is
    /// an accepted limitation of the recognizer's indexing.
    pub fn selected_text(&self) -> String {
        let words = self.selected_words();
        let mut out = String::new();
        let mut last_line: Option<LineId> = None;

        for word in words {
            match last_line {
                None => {}
                Some(line) if line == word.line_id => out.push(' '),
                Some(_) => out.push('\n'),
            }
            out.push_str(&word.text);
            last_line = Some(word.line_id);
        }

        tidy_punctuation(&out)
    }
}

/// Closing punctuation never preceded by a space.
const NO_SPACE_BEFORE: &[char] = &[
    ',', '.', '!', '?', ':', ';', '%', '°', '»', '"', '\'', '”', ')', ']', '}',
];

/// Opening punctuation never followed by a space.
const NO_SPACE_AFTER: &[char] = &['«', '\'', '"', '“', '(', '[', '{'];

/// Approximate natural typographic spacing around punctuation.
///
/// Heuristic only: recognizers emit punctuation as separate word tokens, so
/// the plain join above leaves `Hello , world !`.
fn tidy_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            if let Some(&next) = chars.get(i + 1) {
                if NO_SPACE_BEFORE.contains(&next) {
                    continue;
                }
            }
            if i > 0 && NO_SPACE_AFTER.contains(&chars[i - 1]) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
