//! The outline extraction pipeline.
//!
//! Stages run sequentially per document: normalization, font profile
//! clustering (one whole-document pass), per-fragment signal scoring,
//! confidence fusion, level assignment, and outline assembly. Within the
//! scoring stage fragments are independent and scored in parallel; across
//! documents each pipeline instance is fully isolated, so batches
//! parallelize one worker per document.

mod assemble;
mod fonts;
mod fuse;
mod levels;
mod normalize;
mod options;
mod signals;

pub use fonts::{FontCluster, FontProfile};
pub use levels::assign_level;
pub use normalize::clean_text;
pub use options::{default_keywords, ExtractOptions, SignalWeights};
pub use signals::{Candidate, SignalScorer, SignalSet};

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::embed;
use crate::error::Result;
use crate::model::{Diagnostics, Fragment, Outline};

/// Outcome of one document run: the outline plus aggregate diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineResult {
    /// The reconstructed outline
    pub outline: Outline,
    /// Anomalies recovered during the run
    pub diagnostics: Diagnostics,
}

/// Run the full pipeline over one document's fragments.
///
/// There is no scenario in which an otherwise-valid document fails: bad
/// fragments are dropped and tallied, a missing embedding backend downgrades
/// one signal, and an empty document yields an empty outline. The only
/// errors are document-level (inconsistent options).
pub fn extract(fragments: Vec<Fragment>, options: &ExtractOptions) -> Result<OutlineResult> {
    options.validate()?;

    let mut diagnostics = Diagnostics::new();
    let fragments = normalize::normalize_fragments(fragments, &mut diagnostics);
    if fragments.is_empty() {
        return Ok(OutlineResult {
            outline: Outline::empty(),
            diagnostics,
        });
    }

    // Whole-document pass before any scoring
    let profile = FontProfile::build(&fragments);

    let scorer = SignalScorer::new(options, &profile);
    let mut candidates: Vec<Candidate> = if options.parallel {
        fragments
            .par_iter()
            .enumerate()
            .map(|(index, fragment)| scorer.score(index, fragment))
            .collect()
    } else {
        fragments
            .iter()
            .enumerate()
            .map(|(index, fragment)| scorer.score(index, fragment))
            .collect()
    };

    let texts: Vec<String> = fragments.iter().map(|f| f.text.clone()).collect();
    embed::apply_semantic_signal(&texts, &mut candidates, options, &mut diagnostics);

    for candidate in &mut candidates {
        fuse::fuse(candidate, &options.weights, options.threshold);
    }
    diagnostics.rejected_candidates = candidates.iter().filter(|c| !c.is_heading).count() as u32;
    debug!(
        "scored {} fragments, {} accepted as headings",
        candidates.len(),
        candidates.len() as u32 - diagnostics.rejected_candidates
    );

    let outline = assemble::build_outline(&fragments, &candidates, options, &mut diagnostics);
    Ok(OutlineResult {
        outline,
        diagnostics,
    })
}

/// Run the pipeline over a batch of documents, one worker per document.
///
/// Documents are fully independent: a failure in one never aborts its
/// siblings, and each entry in the returned vector corresponds to the
/// document at the same input position.
pub fn extract_batch(
    documents: Vec<Vec<Fragment>>,
    options: &ExtractOptions,
) -> Vec<Result<OutlineResult>> {
    documents
        .into_par_iter()
        .map(|fragments| extract(fragments, options))
        .collect()
}
