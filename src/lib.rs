//! # untoc
//!
//! Document outline reconstruction for Rust.
//!
//! This library takes the raw text fragments emitted by a PDF (or other
//! layout-preserving) text extractor and reconstructs the document's
//! logical outline: a title plus a nested sequence of headings with
//! levels, page numbers, and confidence scores.
//!
//! No single layout signal is reliable on its own, so the pipeline fuses
//! several independent ones per fragment (font cluster rank,
//! capitalization, numbering, structural keywords, length, optional
//! semantic similarity) into one deterministic confidence value.
//!
//! ## Quick Start
//!
//! ```
//! use untoc::{extract_outline, Fragment};
//!
//! fn main() -> untoc::Result<()> {
//!     let fragments = vec![
//!         Fragment::new("Service Manual", 1, 24.0).at_y(40.0),
//!         Fragment::new("1. Introduction", 1, 18.0).at_y(120.0),
//!         Fragment::new("This manual describes the service procedures.", 1, 11.0).at_y(150.0),
//!     ];
//!
//!     let result = extract_outline(fragments)?;
//!     assert_eq!(result.outline.title, "Service Manual");
//!     assert_eq!(result.outline.nodes[0].text, "1. Introduction");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Signal fusion**: weighted, auditable combination of independent
//!   heuristics instead of a trained classifier
//! - **Deterministic output**: identical input yields byte-identical JSON
//! - **Graceful degradation**: the optional embedding backend may be
//!   missing, failing, or slow without failing a document
//! - **Parallel processing**: Rayon across fragments and across documents
//! - **Diagnostics**: every dropped fragment and downgraded signal is
//!   tallied, never silently discarded

pub mod embed;
pub mod error;
pub mod json;
pub mod model;
pub mod pipeline;

// Re-export commonly used types
pub use embed::{cosine_similarity, set_default_backend, EmbeddingBackend, HEADING_EXEMPLARS};
pub use error::{Error, Result};
pub use json::{to_json, JsonFormat};
pub use model::{BBox, Diagnostics, FontWeight, Fragment, HeadingLevel, HeadingNode, Outline};
pub use pipeline::{
    default_keywords, extract, extract_batch, ExtractOptions, OutlineResult, SignalWeights,
};

/// Extract a document outline with default options.
///
/// # Example
///
/// ```
/// use untoc::{extract_outline, Fragment};
///
/// let result = extract_outline(vec![Fragment::new("TITLE", 1, 24.0)]).unwrap();
/// assert_eq!(result.outline.title, "TITLE");
/// ```
pub fn extract_outline(fragments: Vec<Fragment>) -> Result<OutlineResult> {
    pipeline::extract(fragments, &ExtractOptions::default())
}

/// Extract a document outline with custom options.
///
/// # Example
///
/// ```
/// use untoc::{extract_outline_with_options, ExtractOptions, Fragment};
///
/// let options = ExtractOptions::new().with_threshold(0.6).sequential();
/// let result = extract_outline_with_options(vec![Fragment::new("Intro", 1, 14.0)], &options);
/// assert!(result.is_ok());
/// ```
pub fn extract_outline_with_options(
    fragments: Vec<Fragment>,
    options: &ExtractOptions,
) -> Result<OutlineResult> {
    pipeline::extract(fragments, options)
}

/// Builder for configuring and running outline extraction.
///
/// # Example
///
/// ```
/// use untoc::{Fragment, Untoc};
///
/// let result = Untoc::new()
///     .with_threshold(0.55)
///     .sequential()
///     .extract(vec![Fragment::new("Overview", 1, 20.0)])?;
/// assert_eq!(result.outline.title, "Overview");
/// # Ok::<(), untoc::Error>(())
/// ```
pub struct Untoc {
    options: ExtractOptions,
}

impl Untoc {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Set the heading acceptance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_threshold(threshold);
        self
    }

    /// Set the fusion weights.
    pub fn with_weights(mut self, weights: SignalWeights) -> Self {
        self.options = self.options.with_weights(weights);
        self
    }

    /// Replace the structural keyword vocabulary.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.options = self.options.with_keywords(keywords);
        self
    }

    /// Set the maximum outline depth including TITLE.
    pub fn with_max_levels(mut self, levels: u8) -> Self {
        self.options = self.options.with_max_levels(levels);
        self
    }

    /// Set the embedding backend for this extraction.
    pub fn with_backend(mut self, backend: std::sync::Arc<dyn EmbeddingBackend>) -> Self {
        self.options = self.options.with_backend(backend);
        self
    }

    /// Run without any embedding backend, ignoring the process default.
    pub fn without_backend(mut self) -> Self {
        self.options = self.options.without_backend();
        self
    }

    /// Disable parallel fragment scoring.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Extract the outline of one document.
    pub fn extract(&self, fragments: Vec<Fragment>) -> Result<OutlineResult> {
        pipeline::extract(fragments, &self.options)
    }

    /// Extract outlines for a batch of documents, one worker per document.
    pub fn extract_batch(&self, documents: Vec<Vec<Fragment>>) -> Vec<Result<OutlineResult>> {
        pipeline::extract_batch(documents, &self.options)
    }

    /// The configured options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }
}

impl Default for Untoc {
    fn default() -> Self {
        Self::new()
    }
}
