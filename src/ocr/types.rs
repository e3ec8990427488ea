//! OCR data types.
//!
//! The recognizer itself is an external collaborator; it hands back
//! word-level records with bounding boxes and layout indices, which are
//! filtered and normalized here before alignment.

use serde::Deserialize;

/// Bounding box in source-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Composite key grouping words of the same visual text line:
/// `(block, paragraph, line)`.
pub type LineId = (u32, u32, u32);

/// One word record as reported by the external recognizer.
///
/// Mirrors the word-level TSV/JSON layout recognizers emit: position, layout
/// indices and a confidence score. Non-word structural records carry empty
/// text and a negative confidence.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWord {
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub block_num: u32,
    #[serde(default)]
    pub par_num: u32,
    #[serde(default)]
    pub line_num: u32,
    #[serde(default)]
    pub word_num: u32,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    -1.0
}

/// A recognized word, ready for overlay alignment.
///
/// Produced once per OCR run and immutable for the lifetime of the
/// recognized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrWord {
    pub text: String,
    pub bbox: BoundingBox,
    pub line_id: LineId,
    pub word_num: u32,
}

impl OcrWord {
    /// Full ordering key: `(block, paragraph, line, word)`.
    #[inline]
    pub fn order_key(&self) -> (u32, u32, u32, u32) {
        let (block, par, line) = self.line_id;
        (block, par, line, self.word_num)
    }
}

/// Filter raw recognizer output into alignable words.
///
/// Empty-text records and records below `min_confidence` are discarded.
pub fn collect_words(raw: impl IntoIterator<Item = RawWord>, min_confidence: f32) -> Vec<OcrWord> {
    raw.into_iter()
        .filter(|r| !r.text.trim().is_empty() && r.confidence >= min_confidence)
        .map(|r| OcrWord {
            text: r.text.trim().to_string(),
            bbox: BoundingBox {
                x: r.left,
                y: r.top,
                width: r.width,
                height: r.height,
            },
            line_id: (r.block_num, r.par_num, r.line_num),
            word_num: r.word_num,
        })
        .collect()
}
