//! Phrase matching with negation scope.
//!
//! Phrases are found as substrings of normalized text, bounded by non-word
//! characters on both sides. A match is negated when a negation marker sits
//! within a fixed number of words before it, inside the same clause.

use regex::Regex;
use std::sync::LazyLock;

use super::lexicon::{is_negation_marker, is_scope_terminator, is_uncertainty_marker};

/// Characters that end a clause for negation purposes
const CLAUSE_BREAKS: &[char] = &['.', ';', '!', '?', ':', '\n'];

/// Upper bound of a pain rating
const PAIN_SCALE_MAX: u8 = 10;

/// Pain scale mentions such as "6/10", "pain level 7" or "rated it 5"
static PAIN_RATING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(\d{1,2})\s*(?:/|out of)\s*10\b").expect("Invalid regex: pain out of ten"),
        Regex::new(
            r"\bpain\s+(?:level|score|rating|severity)?\s*(?:is\s+|of\s+|at\s+|was\s+|about\s+|around\s+)?(\d{1,2})\b",
        )
        .expect("Invalid regex: pain level"),
        Regex::new(
            r"\b(?:rated|rate|rating)\s+(?:it|the pain|my pain|the discomfort)\s+(?:a\s+|an\s+|at\s+|as\s+)?(\d{1,2})\b",
        )
        .expect("Invalid regex: rated it"),
    ]
});

/// Polarity of the phrase list a match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Concerning,
    Positive,
}

/// A phrase found in the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    pub phrase: &'static str,
    pub polarity: Polarity,
    pub start: usize,
    pub end: usize,
    pub negated: bool,
}

impl PhraseMatch {
    fn strictly_contains(&self, other: &PhraseMatch) -> bool {
        self.start <= other.start
            && other.end <= self.end
            && (self.end - self.start) > (other.end - other.start)
    }
}

/// Lowercase, unify apostrophes and collapse whitespace
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(['\u{2019}', '\u{2018}', '`'], "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

fn at_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Byte spans of every bounded occurrence of `phrase` in `text`
pub fn find_phrase(text: &str, phrase: &str) -> Vec<(usize, usize)> {
    if phrase.is_empty() {
        return vec![];
    }

    text.match_indices(phrase)
        .map(|(start, m)| (start, start + m.len()))
        .filter(|&(start, end)| at_word_boundary(text, start, end))
        .collect()
}

/// Whether a negation marker appears within `window` words before `start`
///
/// The backward scan stops at contrast words and hedges ("not sure if"). A
/// marker followed directly by a comma ("no, i have ...") answers a question
/// and does not negate what follows.
pub fn is_negated(text: &str, start: usize, window: usize) -> bool {
    let prefix = &text[..start];
    let clause = match prefix.rfind(CLAUSE_BREAKS) {
        Some(idx) => &prefix[idx + 1..],
        None => prefix,
    };

    let mut words: Vec<(&str, bool)> = Vec::new();
    for token in clause.split(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        let pieces: Vec<&str> = token.split(',').collect();
        for (i, piece) in pieces.iter().enumerate() {
            let word = piece.trim_matches(|c: char| !is_word_char(c));
            if !word.is_empty() {
                words.push((word, i + 1 < pieces.len()));
            }
        }
    }

    for (word, comma_after) in words.into_iter().rev().take(window) {
        if is_scope_terminator(word) || is_uncertainty_marker(word) {
            return false;
        }
        if is_negation_marker(word) {
            return !comma_after;
        }
    }

    false
}

/// Scan normalized text for all phrases of both lists
///
/// Matches nested strictly inside a longer match are dropped, whatever
/// their polarity, so "pain" never fires inside "pain free".
pub fn scan(
    text: &str,
    concerning: &[&'static str],
    positive: &[&'static str],
    negation_window: usize,
) -> Vec<PhraseMatch> {
    let mut matches = Vec::new();

    for (phrases, polarity) in [
        (concerning, Polarity::Concerning),
        (positive, Polarity::Positive),
    ] {
        for &phrase in phrases {
            for (start, end) in find_phrase(text, phrase) {
                matches.push(PhraseMatch {
                    phrase,
                    polarity,
                    start,
                    end,
                    negated: is_negated(text, start, negation_window),
                });
            }
        }
    }

    let mut kept: Vec<PhraseMatch> = matches
        .iter()
        .filter(|m| !matches.iter().any(|outer| outer.strictly_contains(m)))
        .cloned()
        .collect();

    kept.sort_by_key(|m| (m.start, m.end));
    kept
}

/// Highest pain rating mentioned in normalized text, if any
pub fn extract_pain_rating(text: &str) -> Option<u8> {
    PAIN_RATING_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()))
        .filter(|value| *value <= PAIN_SCALE_MAX)
        .max()
}
