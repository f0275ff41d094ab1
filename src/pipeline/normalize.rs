//! Fragment normalization: text cleanup and deduplication ahead of clustering.

use std::collections::HashSet;

use log::debug;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Diagnostics, Fragment};

/// Clean and deduplicate raw fragments.
///
/// Never fails: an empty input yields an empty output, which downstream
/// stages treat as "no outline". Malformed fragments are dropped before
/// clustering; every drop is tallied in `diag`.
pub fn normalize_fragments(fragments: Vec<Fragment>, diag: &mut Diagnostics) -> Vec<Fragment> {
    let mut seen: HashSet<(String, u32, [u32; 4])> = HashSet::new();
    let mut out = Vec::with_capacity(fragments.len());

    for mut fragment in fragments {
        if !fragment.is_well_formed() {
            diag.malformed_fragments += 1;
            continue;
        }

        let cleaned = clean_text(&fragment.text);
        if cleaned.is_empty() {
            diag.empty_fragments += 1;
            continue;
        }

        let key = (cleaned.clone(), fragment.page, fragment.bbox.key());
        if !seen.insert(key) {
            diag.duplicate_fragments += 1;
            continue;
        }

        fragment.text = cleaned;
        out.push(fragment);
    }

    if diag.dropped_fragments() > 0 {
        debug!(
            "normalization dropped {} fragments ({} malformed, {} empty, {} duplicates)",
            diag.dropped_fragments(),
            diag.malformed_fragments,
            diag.empty_fragments,
            diag.duplicate_fragments
        );
    }

    out
}

/// NFC-normalize, strip control characters, and collapse whitespace runs
/// to single spaces. Leading and trailing whitespace is removed.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfc() {
        if c.is_control() {
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  1.\tIntroduction \n"), "1. Introduction");
        assert_eq!(clean_text("a\u{0000}b\u{009f}c"), "abc");
        assert_eq!(clean_text(" \t\n "), "");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let mut diag = Diagnostics::new();
        let out = normalize_fragments(vec![], &mut diag);
        assert!(out.is_empty());
        assert_eq!(diag.dropped_fragments(), 0);
    }

    #[test]
    fn test_drops_malformed_and_empty() {
        let mut diag = Diagnostics::new();
        let fragments = vec![
            Fragment::new("ok", 1, 12.0),
            Fragment::new("no page", 0, 12.0),
            Fragment::new("   ", 1, 12.0),
            Fragment::new("bad size", 1, -1.0),
        ];

        let out = normalize_fragments(fragments, &mut diag);
        assert_eq!(out.len(), 1);
        assert_eq!(diag.malformed_fragments, 2);
        assert_eq!(diag.empty_fragments, 1);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut diag = Diagnostics::new();
        let bbox = BBox::new(0.0, 10.0, 50.0, 22.0);
        let fragments = vec![
            Fragment::new("Heading", 1, 14.0).with_bbox(bbox).with_block_index(0),
            Fragment::new("Heading", 1, 14.0).with_bbox(bbox).with_block_index(7),
            // Same text on a different page is not a duplicate
            Fragment::new("Heading", 2, 14.0).with_bbox(bbox),
        ];

        let out = normalize_fragments(fragments, &mut diag);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].block_index, 0);
        assert_eq!(diag.duplicate_fragments, 1);
    }
}
