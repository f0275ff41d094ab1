//! Per-fragment heading signals.
//!
//! Every signal is independent, normalized to [0, 1], and computed from a
//! single fragment plus the read-only document font profile. Nothing here
//! depends on any other fragment, so scoring parallelizes freely.

use regex::Regex;
use serde::Serialize;

use crate::embed::NEUTRAL_SEMANTIC;
use crate::model::Fragment;
use crate::pipeline::fonts::FontProfile;
use crate::pipeline::options::ExtractOptions;

/// Independent per-fragment heading evidence.
///
/// `font_rank` is `None` when the document's font profile is degenerate
/// (one distinct size); its fusion weight is then redistributed across the
/// remaining signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalSet {
    /// Relative font cluster rank, 1.0 at rank 0
    pub font_rank: Option<f32>,
    /// Leading numbering pattern
    pub numbering: f32,
    /// ALL-CAPS or Title-Case pattern
    pub capitalization: f32,
    /// Structural keyword match
    pub keyword: f32,
    /// Short, non-sentence text
    pub length: f32,
    /// Exemplar similarity, neutral 0.5 without a backend
    pub semantic: f32,
}

impl Default for SignalSet {
    fn default() -> Self {
        Self {
            font_rank: None,
            numbering: 0.0,
            capitalization: 0.0,
            keyword: 0.0,
            length: 0.0,
            semantic: NEUTRAL_SEMANTIC,
        }
    }
}

/// A scored fragment, owned exclusively by the worker that computes it
/// until it is handed to the fuser. After fusion it is never mutated.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Index into the normalized fragment sequence
    pub index: usize,
    /// Per-signal evidence
    pub signals: SignalSet,
    /// Font cluster rank of the fragment (0 = largest)
    pub font_rank: usize,
    /// Numbering depth ("2.1" = 2), 0 when unnumbered
    pub numbering_depth: u8,
    /// Decorative or boilerplate text, never a heading
    pub noise: bool,
    /// Fused confidence in [0, 1], set by the fuser
    pub confidence: f32,
    /// Heading decision, set by the fuser
    pub is_heading: bool,
}

/// Computes all non-semantic signals for one fragment at a time.
pub struct SignalScorer<'a> {
    options: &'a ExtractOptions,
    profile: &'a FontProfile,
    decimal_numbering: Regex,
    letter_numbering: Regex,
    roman_numbering: Regex,
    bare_number: Regex,
    page_marker: Regex,
    date_like: Regex,
}

impl<'a> SignalScorer<'a> {
    /// Create a scorer over one document's font profile.
    pub fn new(options: &'a ExtractOptions, profile: &'a FontProfile) -> Self {
        Self {
            options,
            profile,
            decimal_numbering: Regex::new(r"^(\d+(?:\.\d+)*)[.)]?\s+\S").unwrap(),
            letter_numbering: Regex::new(r"^[A-Z][.)]\s+\S").unwrap(),
            roman_numbering: Regex::new(r"^[IVXLCDM]{1,7}[.)]\s+\S").unwrap(),
            bare_number: Regex::new(r"^\d+\.?$").unwrap(),
            page_marker: Regex::new(r"(?i)^page\s+\d+").unwrap(),
            date_like: Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{2,4}").unwrap(),
        }
    }

    /// Score one fragment. The semantic signal starts neutral and is filled
    /// in by the (optional, time-bounded) embedding pass afterwards.
    pub fn score(&self, index: usize, fragment: &Fragment) -> Candidate {
        let text = fragment.text.as_str();
        let font_rank = self.profile.rank_of(fragment.font_size);

        if self.is_noise(text) {
            return Candidate {
                index,
                signals: SignalSet::default(),
                font_rank,
                numbering_depth: 0,
                noise: true,
                confidence: 0.0,
                is_heading: false,
            };
        }

        let (numbering, numbering_depth) = self.numbering_signal(text);
        let signals = SignalSet {
            font_rank: self.font_rank_signal(font_rank),
            numbering,
            capitalization: capitalization_signal(text),
            keyword: self.keyword_signal(text),
            length: self.length_signal(text),
            semantic: NEUTRAL_SEMANTIC,
        };

        Candidate {
            index,
            signals,
            font_rank,
            numbering_depth,
            noise: false,
            confidence: 0.0,
            is_heading: false,
        }
    }

    /// 1.0 at rank 0, decaying linearly to 0.0 at the deepest (body) rank.
    /// Unavailable when the profile is degenerate.
    fn font_rank_signal(&self, rank: usize) -> Option<f32> {
        let ranks = self.profile.rank_count();
        if self.profile.is_degenerate() {
            return None;
        }
        Some(1.0 - rank as f32 / (ranks - 1) as f32)
    }

    /// 1.0 for a leading numbering pattern, eased down slightly per
    /// numbering depth; depth itself feeds the level assigner, not the
    /// confidence alone.
    fn numbering_signal(&self, text: &str) -> (f32, u8) {
        if let Some(caps) = self.decimal_numbering.captures(text) {
            let depth = caps[1].split('.').count().min(u8::MAX as usize) as u8;
            let value = (1.0 - 0.1 * (depth.saturating_sub(1)) as f32).max(0.5);
            return (value, depth);
        }
        if self.roman_numbering.is_match(text) || self.letter_numbering.is_match(text) {
            return (1.0, 1);
        }
        (0.0, 0)
    }

    /// Whole-word, case-insensitive match against the structural vocabulary.
    fn keyword_signal(&self, text: &str) -> f32 {
        let lowered: String = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let padded = format!(" {} ", lowered.split_whitespace().collect::<Vec<_>>().join(" "));

        for keyword in &self.options.keywords {
            if padded.contains(&format!(" {} ", keyword)) {
                return 1.0;
            }
        }
        0.0
    }

    /// 1.0 for short text without sentence-terminal punctuation.
    fn length_signal(&self, text: &str) -> f32 {
        let words = text.split_whitespace().count();
        let sentence_end = text.ends_with('.') || text.ends_with('!') || text.ends_with('?');
        if words <= self.options.short_heading_words && !sentence_end {
            1.0
        } else {
            0.0
        }
    }

    /// Decorative or boilerplate text that can never be a heading:
    /// bare numbers, page markers, dates, dotted/underscore leader lines,
    /// punctuation-only runs.
    fn is_noise(&self, text: &str) -> bool {
        if self.bare_number.is_match(text)
            || self.page_marker.is_match(text)
            || self.date_like.is_match(text)
        {
            return true;
        }
        if text.matches('.').count() > 8 || text.matches('_').count() > 8 {
            return true;
        }
        !text.chars().any(|c| c.is_alphanumeric())
    }
}

/// 1.0 if the text is ALL-CAPS or at least 80% of its alphabetic words are
/// capitalized, else 0.0.
fn capitalization_signal(text: &str) -> f32 {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return 0.0;
    }
    if letters.iter().all(|c| c.is_uppercase()) {
        return 1.0;
    }

    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_alphabetic()))
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let capitalized = words
        .iter()
        .filter(|w| {
            w.chars()
                .find(|c| c.is_alphabetic())
                .map(|c| c.is_uppercase())
                .unwrap_or(false)
        })
        .count();

    if capitalized as f32 >= 0.8 * words.len() as f32 {
        1.0
    } else {
        0.0
    }
}
