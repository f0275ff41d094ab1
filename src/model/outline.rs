//! Outline output types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Level of a node in the reconstructed outline.
///
/// `Title` is logical only: the single title node is surfaced through
/// [`Outline::title`] and never appears among the serialized heading
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// The document title
    #[serde(rename = "TITLE")]
    Title,
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Fourth-level heading
    H4,
    /// Fifth-level heading
    H5,
    /// Sixth-level heading
    H6,
}

impl HeadingLevel {
    /// Map a 1-based heading depth to a level, clamping to H6.
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 => HeadingLevel::Title,
            1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            _ => HeadingLevel::H6,
        }
    }

    /// Heading depth (Title = 0, H1 = 1, ...).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    /// The serialized form ("TITLE", "H1", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::Title => "TITLE",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
            HeadingLevel::H5 => "H5",
            HeadingLevel::H6 => "H6",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single accepted heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingNode {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// 1-based page number
    pub page: u32,
    /// Fused confidence in [0, 1]
    pub confidence: f32,
}

impl HeadingNode {
    /// Create a new heading node.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32, confidence: f32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            confidence,
        }
    }
}

/// The reconstructed document outline: a title plus ordered headings.
///
/// Serializes to the output contract consumed downstream:
///
/// ```json
/// {"title": "...", "outline": [{"level": "H1", "text": "...", "page": 1, "confidence": 0.8}]}
/// ```
///
/// `title` is the empty string (never null) when no fragment qualifies.
/// `outline` entries are in final reading order: page ascending, vertical
/// position ascending within a page, block index ascending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outline {
    /// Document title, empty when nothing qualifies
    pub title: String,
    /// Accepted headings in reading order
    #[serde(rename = "outline")]
    pub nodes: Vec<HeadingNode>,
}

impl Outline {
    /// Create an empty outline (valid result for an empty document).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of heading nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
