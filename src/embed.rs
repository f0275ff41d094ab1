//! Optional semantic-embedding backend.
//!
//! Semantic similarity is one weighted signal among several, never a
//! standalone classifier. The pipeline works without any backend: the
//! signal then takes its neutral value and the run is flagged in the
//! per-document diagnostics, not failed.

use std::sync::{Arc, OnceLock};
use std::thread;

use crossbeam_channel::bounded;
use log::warn;

use crate::model::Diagnostics;
use crate::pipeline::{Candidate, ExtractOptions};

/// Semantic signal value used when no embedding is available.
pub const NEUTRAL_SEMANTIC: f32 = 0.5;

/// Heading-exemplar phrases candidate fragments are scored against.
pub const HEADING_EXEMPLARS: &[&str] = &[
    "Introduction",
    "1. Overview",
    "Chapter 1",
    "Background",
    "2.1 Methodology",
    "Results and Discussion",
    "Summary",
    "Conclusion",
    "References",
    "Appendix A",
    "Table of Contents",
];

/// A pluggable text-embedding backend.
///
/// From the pipeline's perspective the backend is pure and stateless:
/// `embed` maps a text to a fixed-length vector. Returning `None` signals
/// that the backend cannot produce an embedding; the pipeline downgrades
/// to the neutral signal instead of erroring.
pub trait EmbeddingBackend: Send + Sync {
    /// Embed a text into a fixed-length numeric vector.
    fn embed(&self, text: &str) -> Option<Vec<f32>>;
}

static DEFAULT_BACKEND: OnceLock<Arc<dyn EmbeddingBackend>> = OnceLock::new();

/// Install the process-wide default backend.
///
/// First call wins; returns `false` if a backend was already installed.
/// The instance is shared read-only across worker threads for the rest of
/// the process lifetime.
pub fn set_default_backend(backend: Arc<dyn EmbeddingBackend>) -> bool {
    DEFAULT_BACKEND.set(backend).is_ok()
}

/// The process-wide default backend, if one was installed.
pub fn default_backend() -> Option<Arc<dyn EmbeddingBackend>> {
    DEFAULT_BACKEND.get().cloned()
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths or zero-magnitude inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Fill in the semantic signal for every candidate, time-bounded.
///
/// Embedding runs on a worker thread and the pipeline waits at most
/// `options.semantic_timeout`; on timeout the worker is detached and the
/// candidates keep their neutral value. Candidate order is index-aligned
/// with `texts`.
pub(crate) fn apply_semantic_signal(
    texts: &[String],
    candidates: &mut [Candidate],
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) {
    let fallback = if options.disable_default_backend {
        None
    } else {
        default_backend()
    };
    let backend = match options.backend.clone().or(fallback) {
        Some(backend) => backend,
        None => {
            diag.semantic_fallback = true;
            warn!("no embedding backend available; semantic signal is neutral");
            return;
        }
    };

    let (tx, rx) = bounded(1);
    let worker_texts = texts.to_vec();
    thread::spawn(move || {
        let scores = compute_semantic_scores(backend.as_ref(), &worker_texts);
        let _ = tx.send(scores);
    });

    match rx.recv_timeout(options.semantic_timeout) {
        Ok(Some(scores)) => {
            for (candidate, score) in candidates.iter_mut().zip(scores) {
                candidate.signals.semantic = score;
            }
        }
        Ok(None) => {
            diag.semantic_fallback = true;
            warn!("embedding backend failed; semantic signal is neutral");
        }
        Err(_) => {
            diag.semantic_fallback = true;
            warn!(
                "embedding timed out after {:?}; semantic signal is neutral",
                options.semantic_timeout
            );
        }
    }
}

/// Best exemplar similarity per text, clipped to [0, 1].
fn compute_semantic_scores(backend: &dyn EmbeddingBackend, texts: &[String]) -> Option<Vec<f32>> {
    let exemplars: Vec<Vec<f32>> = HEADING_EXEMPLARS
        .iter()
        .map(|e| backend.embed(e))
        .collect::<Option<_>>()?;

    texts
        .iter()
        .map(|text| {
            let vector = backend.embed(text)?;
            let best = exemplars
                .iter()
                .map(|e| cosine_similarity(e, &vector))
                .fold(0.0f32, f32::max);
            Some(best.clamp(0.0, 1.0))
        })
        .collect()
}
