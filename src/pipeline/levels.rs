//! Level assignment: font cluster rank refined by numbering depth.

use crate::model::{HeadingLevel, HeadingNode};

/// Map an accepted candidate to its heading level.
///
/// Font rank is primary: rank r maps to H(r+1). Numbering depth refines
/// siblings sharing a rank into deeper levels when numbering nests ("2."
/// then "2.1" at the same font size yield H1 then H2). Candidates that
/// would exceed the depth bound are clamped to the deepest level, never
/// rejected.
pub fn assign_level(font_rank: usize, numbering_depth: u8, max_levels: u8) -> HeadingLevel {
    // One level is reserved for TITLE
    let deepest = (max_levels.max(2) - 1) as usize;
    let base = font_rank + 1;
    let depth = if numbering_depth > 1 {
        base + numbering_depth as usize - 1
    } else {
        base
    };
    HeadingLevel::from_depth(depth.min(deepest).min(u8::MAX as usize) as u8)
}

/// Smooth the ordered outline so no heading jumps more than one level
/// deeper than its predecessor.
pub fn smooth_hierarchy(nodes: &mut [HeadingNode]) {
    for i in 1..nodes.len() {
        let previous = nodes[i - 1].level.depth();
        if nodes[i].level.depth() > previous + 1 {
            nodes[i].level = HeadingLevel::from_depth(previous + 1);
        }
    }
}
