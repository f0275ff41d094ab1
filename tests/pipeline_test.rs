//! End-to-end pipeline tests over synthetic fragment sequences.

use std::sync::Arc;

use untoc::{
    extract_outline, to_json, EmbeddingBackend, ExtractOptions, Fragment, HeadingLevel,
    JsonFormat, Untoc,
};

/// Deterministic stand-in for a real embedding model: hashes character
/// buckets into a fixed-length vector.
struct BucketBackend;

impl EmbeddingBackend for BucketBackend {
    fn embed(&self, text: &str) -> Option<Vec<f32>> {
        let mut v = vec![0.0f32; 8];
        for (i, c) in text.to_lowercase().chars().enumerate() {
            v[(c as usize + i) % 8] += 1.0;
        }
        Some(v)
    }
}

fn frag(text: &str, page: u32, size: f32, y: f32) -> Fragment {
    Fragment::new(text, page, size).at_y(y)
}

fn body(page: u32, y: f32) -> Fragment {
    frag(
        "this is an ordinary run of body text that keeps going for a while and ends in a period.",
        page,
        10.0,
        y,
    )
}

#[test]
fn scenario_single_title_fragment() {
    let result = extract_outline(vec![frag("TITLE", 1, 24.0, 40.0)]).unwrap();

    assert_eq!(result.outline.title, "TITLE");
    assert!(result.outline.is_empty());
}

#[test]
fn scenario_numbering_depth_refinement() {
    let fragments = vec![
        frag("1. Introduction", 1, 18.0, 50.0),
        frag("1.1 Background", 1, 18.0, 100.0),
        body(1, 130.0),
    ];

    let result = extract_outline(fragments).unwrap();
    let nodes = &result.outline.nodes;

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].text, "1. Introduction");
    assert_eq!(nodes[0].level, HeadingLevel::H1);
    assert_eq!(nodes[1].text, "1.1 Background");
    assert_eq!(nodes[1].level, HeadingLevel::H2);
}

#[test]
fn scenario_uniform_font_size_redistribution() {
    // All fragments share one size: clustering falls back, the font signal
    // weight is redistributed, and keyword/capitalization evidence alone
    // carries "Conclusion" over the threshold.
    let fragments = vec![
        frag("Project Status Report", 1, 12.0, 40.0),
        frag(
            "status text that reads like a normal paragraph and closes with punctuation.",
            1,
            12.0,
            80.0,
        ),
        frag("Conclusion", 2, 12.0, 40.0),
    ];

    let result = extract_outline(fragments).unwrap();
    let conclusion = result
        .outline
        .nodes
        .iter()
        .find(|n| n.text == "Conclusion")
        .expect("Conclusion accepted as heading");

    assert!(conclusion.confidence >= 0.5);
    assert_eq!(conclusion.page, 2);
    assert_eq!(result.outline.title, "Project Status Report");
}

#[test]
fn determinism_byte_identical_output() {
    let fragments: Vec<Fragment> = (0..60)
        .map(|i| {
            let size = match i % 12 {
                0 => 22.0,
                1 => 16.0,
                _ => 10.5,
            };
            frag(&format!("Section text {i}"), 1 + i / 12, size, (i % 12) as f32 * 40.0)
        })
        .collect();

    let a = extract_outline(fragments.clone()).unwrap();
    let b = extract_outline(fragments).unwrap();

    assert_eq!(
        to_json(&a.outline, JsonFormat::Compact).unwrap(),
        to_json(&b.outline, JsonFormat::Compact).unwrap()
    );
}

#[test]
fn title_never_empty_for_nonempty_input() {
    let documents = vec![
        vec![frag("lowercase mumble", 1, 9.0, 10.0)],
        vec![body(3, 10.0)],
        vec![frag("Z", 2, 30.0, 0.0)],
    ];

    for fragments in documents {
        let result = extract_outline(fragments).unwrap();
        assert!(!result.outline.title.is_empty());
    }
}

#[test]
fn outline_order_is_monotonic() {
    let fragments = vec![
        frag("Manual", 1, 24.0, 10.0),
        frag("C. Appendix Material", 3, 16.0, 50.0),
        frag("A. Setup", 1, 16.0, 200.0),
        frag("B. Operation", 2, 16.0, 40.0),
        frag("B. Maintenance Steps", 2, 16.0, 300.0),
        body(1, 400.0),
        body(2, 500.0),
    ];

    let result = extract_outline(fragments).unwrap();
    let nodes = &result.outline.nodes;
    assert!(nodes.len() >= 3);

    for pair in nodes.windows(2) {
        assert!(pair[0].page <= pair[1].page);
    }
    let texts: Vec<&str> = nodes.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts[0], "A. Setup");
}

#[test]
fn confidence_always_in_bounds() {
    let fragments = vec![
        frag("EVERYTHING FIRES HERE", 1, 30.0, 10.0),
        frag("1.2.3 Deep Numbering Overview", 1, 30.0, 50.0),
        body(1, 90.0),
    ];

    let result = extract_outline(fragments).unwrap();
    for node in &result.outline.nodes {
        assert!((0.0..=1.0).contains(&node.confidence), "{:?}", node);
    }
}

#[test]
fn graceful_degradation_without_backend() {
    let fragments = vec![
        frag("Operations Handbook", 1, 24.0, 20.0),
        frag("1. Introduction", 1, 16.0, 80.0),
        frag("2. Procedures", 2, 16.0, 40.0),
        body(1, 120.0),
        body(2, 80.0),
    ];

    let with_backend = Untoc::new()
        .with_backend(Arc::new(BucketBackend))
        .extract(fragments.clone())
        .unwrap();
    let without_backend = Untoc::new()
        .without_backend()
        .extract(fragments)
        .unwrap();

    assert!(without_backend.diagnostics.semantic_fallback);
    assert!(!with_backend.diagnostics.semantic_fallback);

    let a = &with_backend.outline.nodes;
    let b = &without_backend.outline.nodes;
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.text, y.text);
        assert_eq!(x.level, y.level);
        assert_eq!(x.page, y.page);
        // Bounded by the semantic weight
        assert!((x.confidence - y.confidence).abs() <= 0.10 + 1e-6);
    }
}

#[test]
fn empty_document_yields_valid_outline() {
    let result = extract_outline(vec![]).unwrap();
    assert_eq!(result.outline.title, "");
    assert!(result.outline.is_empty());

    let json = to_json(&result.outline, JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"title":"","outline":[]}"#);
}

#[test]
fn malformed_fragments_are_tallied_not_fatal() {
    let fragments = vec![
        frag("Report", 1, 20.0, 10.0),
        Fragment::new("no page number", 0, 12.0),
        Fragment::new("zero font size", 2, 0.0),
        Fragment::new("\u{0001}\u{0002}", 1, 12.0),
    ];

    let result = extract_outline(fragments).unwrap();
    assert_eq!(result.diagnostics.malformed_fragments, 2);
    assert_eq!(result.diagnostics.empty_fragments, 1);
    assert_eq!(result.outline.title, "Report");
}

#[test]
fn extraction_order_does_not_matter() {
    let mut fragments = vec![
        frag("Guide", 1, 24.0, 10.0),
        frag("1. First", 1, 16.0, 60.0),
        frag("2. Second", 2, 16.0, 60.0),
        body(1, 100.0),
    ];

    let forward = extract_outline(fragments.clone()).unwrap();
    fragments.reverse();
    let reversed = extract_outline(fragments).unwrap();

    assert_eq!(
        to_json(&forward.outline, JsonFormat::Compact).unwrap(),
        to_json(&reversed.outline, JsonFormat::Compact).unwrap()
    );
}

#[test]
fn batch_results_align_with_input_positions() {
    let untoc = Untoc::new();
    let results = untoc.extract_batch(vec![
        vec![frag("First Document", 1, 20.0, 10.0)],
        vec![],
        vec![frag("Third Document", 1, 20.0, 10.0)],
    ]);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().outline.title, "First Document");
    assert_eq!(results[1].as_ref().unwrap().outline.title, "");
    assert_eq!(results[2].as_ref().unwrap().outline.title, "Third Document");
}

#[test]
fn invalid_options_fail_per_document_not_panic() {
    let options = ExtractOptions::new().with_threshold(-0.5);
    let results = untoc::extract_batch(vec![vec![frag("Doc", 1, 20.0, 10.0)]], &options);
    assert!(results[0].is_err());
}
