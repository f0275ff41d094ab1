//! Per-document extraction diagnostics.

use serde::{Deserialize, Serialize};

/// Aggregate tally of anomalies recovered during one document's extraction.
///
/// The pipeline never fails an otherwise-valid document over a bad fragment;
/// everything dropped or downgraded along the way is counted here and
/// attached to the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Fragments dropped before clustering for missing page/font metadata
    pub malformed_fragments: u32,

    /// Fragments dropped because their cleaned text was empty
    pub empty_fragments: u32,

    /// Exact (text, page, bbox) duplicates removed, first occurrence kept
    pub duplicate_fragments: u32,

    /// Candidates whose fused confidence fell below the heading threshold
    pub rejected_candidates: u32,

    /// Heading nodes suppressed as same-page duplicates of a stronger node
    pub suppressed_duplicates: u32,

    /// Nodes rejected for malformed data during outline assembly
    pub malformed_nodes: u32,

    /// Whether the semantic signal fell back to its neutral value
    /// (backend absent, failed, or timed out)
    pub semantic_fallback: bool,
}

impl Diagnostics {
    /// Create new empty diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total fragments dropped before scoring.
    pub fn dropped_fragments(&self) -> u32 {
        self.malformed_fragments + self.empty_fragments + self.duplicate_fragments
    }

    /// Merge another tally into this one (batch aggregation).
    pub fn merge(&mut self, other: &Diagnostics) {
        self.malformed_fragments += other.malformed_fragments;
        self.empty_fragments += other.empty_fragments;
        self.duplicate_fragments += other.duplicate_fragments;
        self.rejected_candidates += other.rejected_candidates;
        self.suppressed_duplicates += other.suppressed_duplicates;
        self.malformed_nodes += other.malformed_nodes;
        self.semantic_fallback |= other.semantic_fallback;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropped_fragments() {
        let diag = Diagnostics {
            malformed_fragments: 2,
            empty_fragments: 3,
            duplicate_fragments: 1,
            ..Default::default()
        };
        assert_eq!(diag.dropped_fragments(), 6);
    }

    #[test]
    fn test_merge() {
        let mut a = Diagnostics {
            malformed_fragments: 1,
            rejected_candidates: 4,
            ..Default::default()
        };
        let b = Diagnostics {
            malformed_fragments: 2,
            suppressed_duplicates: 1,
            semantic_fallback: true,
            ..Default::default()
        };

        a.merge(&b);
        assert_eq!(a.malformed_fragments, 3);
        assert_eq!(a.rejected_candidates, 4);
        assert_eq!(a.suppressed_duplicates, 1);
        assert!(a.semantic_fallback);
    }
}
