//! Outline assembly: title selection, reading-order sort, duplicate
//! suppression, and hierarchy smoothing.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;

use crate::model::{Diagnostics, Fragment, HeadingNode, Outline};
use crate::pipeline::levels::{assign_level, smooth_hierarchy};
use crate::pipeline::options::ExtractOptions;
use crate::pipeline::signals::Candidate;

/// Reading-order key: page ascending, vertical position ascending within a
/// page, block index ascending. Fixed ordering keeps output deterministic
/// for identical input.
fn reading_order(fragment: &Fragment) -> (u32, f32, u32) {
    (fragment.page, fragment.bbox.y0, fragment.block_index)
}

fn compare_reading_order(a: &Fragment, b: &Fragment) -> Ordering {
    let (ap, ay, ab) = reading_order(a);
    let (bp, by, bb) = reading_order(b);
    ap.cmp(&bp)
        .then(ay.partial_cmp(&by).unwrap_or(Ordering::Equal))
        .then(ab.cmp(&bb))
}

/// Assemble the final outline from fused candidates.
pub fn build_outline(
    fragments: &[Fragment],
    candidates: &[Candidate],
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> Outline {
    if fragments.is_empty() {
        return Outline::empty();
    }

    let first_page = fragments.iter().map(|f| f.page).min().unwrap_or(1);

    // Title: highest-confidence heading candidate on the first page at font
    // rank 0; ties broken toward the earlier fragment in reading order.
    // Numbered fragments are section headings, never the document title.
    let title_index = candidates
        .iter()
        .filter(|c| c.is_heading && c.font_rank == 0 && c.numbering_depth == 0)
        .filter(|c| fragments[c.index].page == first_page)
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    compare_reading_order(&fragments[b.index], &fragments[a.index])
                })
        })
        .map(|c| c.index);

    // Fallback: first normalized fragment in reading order. Normalized
    // fragments are never empty, so the title is non-empty whenever any
    // fragment survived normalization.
    let title = match title_index {
        Some(index) => fragments[index].text.clone(),
        None => fragments
            .iter()
            .min_by(|a, b| compare_reading_order(a, b))
            .map(|f| f.text.clone())
            .unwrap_or_default(),
    };

    // Accepted headings, excluding the fragment promoted to title
    let mut entries: Vec<(usize, HeadingNode)> = Vec::new();
    for candidate in candidates.iter().filter(|c| c.is_heading) {
        if Some(candidate.index) == title_index {
            continue;
        }
        let fragment = &fragments[candidate.index];
        if fragment.page < 1 {
            // Cannot place a node without a page; counted, never silent
            diag.malformed_nodes += 1;
            continue;
        }
        let level = assign_level(candidate.font_rank, candidate.numbering_depth, options.max_levels);
        entries.push((
            candidate.index,
            HeadingNode::new(level, fragment.text.clone(), fragment.page, candidate.confidence),
        ));
    }

    // Same cleaned text on the same page: keep the higher-confidence node
    let mut kept: HashMap<(u32, String), usize> = HashMap::new();
    let mut deduped: Vec<(usize, HeadingNode)> = Vec::new();
    for (index, node) in entries {
        let key = (node.page, node.text.to_lowercase());
        match kept.get(&key).copied() {
            Some(slot) => {
                diag.suppressed_duplicates += 1;
                if node.confidence > deduped[slot].1.confidence {
                    deduped[slot] = (index, node);
                }
            }
            None => {
                kept.insert(key, deduped.len());
                deduped.push((index, node));
            }
        }
    }

    deduped.sort_by(|(a, _), (b, _)| compare_reading_order(&fragments[*a], &fragments[*b]));

    let mut nodes: Vec<HeadingNode> = deduped.into_iter().map(|(_, node)| node).collect();
    smooth_hierarchy(&mut nodes);

    debug!("outline: title {:?}, {} headings", !title.is_empty(), nodes.len());
    Outline { title, nodes }
}
