//! Confidence fusion: deterministic weighted combination of heading signals.
//!
//! A weighted linear sum is used instead of a learned classifier: it is
//! auditable, needs no training data, and degrades gracefully when a signal
//! is unavailable. The weight of an unavailable signal is redistributed
//! proportionally across the available ones by normalizing over the
//! available weight mass.

use crate::pipeline::options::SignalWeights;
use crate::pipeline::signals::Candidate;

/// Fuse a candidate's signals into one confidence value and the binary
/// heading decision. After this call the candidate is never mutated again.
pub fn fuse(candidate: &mut Candidate, weights: &SignalWeights, threshold: f32) {
    if candidate.noise {
        candidate.confidence = 0.0;
        candidate.is_heading = false;
        return;
    }

    let signals = &candidate.signals;
    let mut weighted = 0.0f32;
    let mut available = 0.0f32;

    if let Some(font_rank) = signals.font_rank {
        weighted += weights.font_rank * font_rank;
        available += weights.font_rank;
    }
    weighted += weights.numbering * signals.numbering;
    available += weights.numbering;
    weighted += weights.capitalization * signals.capitalization;
    available += weights.capitalization;
    weighted += weights.keyword * signals.keyword;
    available += weights.keyword;
    weighted += weights.length * signals.length;
    available += weights.length;
    weighted += weights.semantic * signals.semantic;
    available += weights.semantic;

    candidate.confidence = if available > 0.0 {
        (weighted / available).clamp(0.0, 1.0)
    } else {
        0.0
    };
    candidate.is_heading = candidate.confidence >= threshold;
}
