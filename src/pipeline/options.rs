//! Extraction options and signal weighting configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::embed::EmbeddingBackend;
use crate::error::{Error, Result};

/// Per-signal fusion weights.
///
/// The documented defaults sum to 1.0. Weights do not have to: fusion
/// normalizes over the weights of the signals that are actually available,
/// which is also how the weight of an unavailable signal is redistributed
/// proportionally across the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    /// Relative font cluster rank (0.30 by default)
    pub font_rank: f32,
    /// Leading numbering pattern (0.20 by default)
    pub numbering: f32,
    /// Capitalization pattern (0.15 by default)
    pub capitalization: f32,
    /// Structural keyword match (0.15 by default)
    pub keyword: f32,
    /// Short-heading length (0.10 by default)
    pub length: f32,
    /// Semantic exemplar similarity (0.10 by default)
    pub semantic: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            font_rank: 0.30,
            numbering: 0.20,
            capitalization: 0.15,
            keyword: 0.15,
            length: 0.10,
            semantic: 0.10,
        }
    }
}

impl SignalWeights {
    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.font_rank + self.numbering + self.capitalization + self.keyword + self.length + self.semantic
    }

    fn validate(&self) -> Result<()> {
        let all = [
            self.font_rank,
            self.numbering,
            self.capitalization,
            self.keyword,
            self.length,
            self.semantic,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidOptions(
                "signal weights must be finite and non-negative".to_string(),
            ));
        }
        if self.sum() <= 0.0 {
            return Err(Error::InvalidOptions(
                "signal weights must not all be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Structural terms matched (case-insensitive, whole-word) by the keyword signal.
pub fn default_keywords() -> Vec<String> {
    [
        "abstract",
        "acknowledgements",
        "appendix",
        "background",
        "bibliography",
        "chapter",
        "conclusion",
        "contents",
        "discussion",
        "glossary",
        "index",
        "introduction",
        "methodology",
        "overview",
        "preface",
        "references",
        "results",
        "section",
        "summary",
        "table of contents",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Options controlling a pipeline run.
///
/// Heuristic constants (keyword vocabulary, weights, threshold) live here
/// rather than in ambient globals so the scorer and fuser can be unit
/// tested with injected configurations.
#[derive(Clone)]
pub struct ExtractOptions {
    /// Fusion weights per signal
    pub weights: SignalWeights,

    /// Heading acceptance threshold on fused confidence
    pub threshold: f32,

    /// Keyword vocabulary for the keyword signal
    pub keywords: Vec<String>,

    /// Maximum word count for the short-heading length signal
    pub short_heading_words: usize,

    /// Maximum outline depth including TITLE (4 = TITLE, H1..H3)
    pub max_levels: u8,

    /// Whether to score fragments in parallel
    pub parallel: bool,

    /// Per-document time budget for semantic embedding
    pub semantic_timeout: Duration,

    /// Embedding backend override; falls back to the process-wide default
    pub backend: Option<Arc<dyn EmbeddingBackend>>,

    /// Skip the process-wide default backend even when one is installed
    pub disable_default_backend: bool,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fusion weights.
    pub fn with_weights(mut self, weights: SignalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the heading acceptance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the keyword vocabulary.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Set the short-heading word limit.
    pub fn with_short_heading_words(mut self, words: usize) -> Self {
        self.short_heading_words = words;
        self
    }

    /// Set the maximum outline depth including TITLE.
    pub fn with_max_levels(mut self, levels: u8) -> Self {
        self.max_levels = levels;
        self
    }

    /// Disable parallel fragment scoring.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable parallel fragment scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the semantic embedding time budget.
    pub fn with_semantic_timeout(mut self, timeout: Duration) -> Self {
        self.semantic_timeout = timeout;
        self
    }

    /// Set the embedding backend for this run.
    pub fn with_backend(mut self, backend: Arc<dyn EmbeddingBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Explicitly run without any embedding backend, ignoring the
    /// process-wide default.
    pub fn without_backend(mut self) -> Self {
        self.backend = None;
        self.disable_default_backend = true;
        self
    }

    /// Validate option consistency.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidOptions(
                "threshold must be within [0, 1]".to_string(),
            ));
        }
        if self.short_heading_words == 0 {
            return Err(Error::InvalidOptions(
                "short_heading_words must be at least 1".to_string(),
            ));
        }
        if self.max_levels < 2 {
            return Err(Error::InvalidOptions(
                "max_levels must allow TITLE plus at least one heading level".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            threshold: 0.5,
            keywords: default_keywords(),
            short_heading_words: 12,
            max_levels: 4,
            parallel: true,
            semantic_timeout: Duration::from_secs(2),
            backend: None,
            disable_default_backend: false,
        }
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("weights", &self.weights)
            .field("threshold", &self.threshold)
            .field("keywords", &self.keywords.len())
            .field("short_heading_words", &self.short_heading_words)
            .field("max_levels", &self.max_levels)
            .field("parallel", &self.parallel)
            .field("semantic_timeout", &self.semantic_timeout)
            .field("backend", &self.backend.is_some())
            .field("disable_default_backend", &self.disable_default_backend)
            .finish()
    }
}
