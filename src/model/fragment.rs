//! Input fragment types supplied by the upstream text extractor.

use serde::{Deserialize, Serialize};

/// Font weight reported by the extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Axis-aligned bounding box in page units.
///
/// Coordinates are top-origin: `y0` is the top edge and y grows downward,
/// matching the coordinate space of common PDF text extractors. Reading
/// order within a page is ascending `y0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Bit-exact key for duplicate detection. NaN-safe and hashable.
    pub(crate) fn key(&self) -> [u32; 4] {
        [
            self.x0.to_bits(),
            self.y0.to_bits(),
            self.x1.to_bits(),
            self.y1.to_bits(),
        ]
    }
}

/// One piece of extracted text with layout and font metadata.
///
/// Fragments are the atomic unit of the pipeline. They arrive in extraction
/// order (not necessarily reading order) and are immutable once produced by
/// the extractor; the pipeline run that receives them owns them exclusively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// The text content
    pub text: String,
    /// 1-based page number
    pub page: u32,
    /// Font size in points
    pub font_size: f32,
    /// Font weight
    pub font_weight: FontWeight,
    /// Bounding box in page units
    pub bbox: BBox,
    /// Index of the layout block the fragment came from
    pub block_index: u32,
}

impl Fragment {
    /// Create a new fragment with default layout metadata.
    pub fn new(text: impl Into<String>, page: u32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            page,
            font_size,
            font_weight: FontWeight::Normal,
            bbox: BBox::default(),
            block_index: 0,
        }
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Set the vertical position, keeping a one-line-high box.
    pub fn at_y(mut self, y0: f32) -> Self {
        self.bbox.y0 = y0;
        self.bbox.y1 = y0 + self.font_size;
        self
    }

    /// Mark the fragment as bold.
    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    /// Set the layout block index.
    pub fn with_block_index(mut self, index: u32) -> Self {
        self.block_index = index;
        self
    }

    /// Check that the fragment carries usable page and font metadata.
    ///
    /// Fragments failing this check are dropped before clustering and
    /// counted in the per-document diagnostics.
    pub fn is_well_formed(&self) -> bool {
        self.page >= 1 && self.font_size.is_finite() && self.font_size > 0.0
    }

    /// Whitespace-separated word count of the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
