//! Phrase tables for the category analyzers.
//!
//! Every category combines its own concerning/positive phrases with the
//! shared general lists below. Phrases are lowercase and matched against
//! normalized text, so they must not carry typographic apostrophes.

use super::category::Category;

/// Words that flip the polarity of a phrase appearing shortly after them
pub const NEGATION_MARKERS: &[&str] = &[
    "no", "not", "never", "none", "nor", "without", "denies", "deny", "denied", "haven't",
    "havent", "hasn't", "hadn't", "don't", "dont", "doesn't", "didn't", "isn't", "wasn't",
    "aren't", "weren't", "nothing",
];

/// Words that end the scope of a preceding negation
pub const SCOPE_TERMINATORS: &[&str] = &[
    "but", "however", "although", "though", "except", "yet", "still",
];

/// Hedges: a phrase after one of these is reported, not denied
pub const UNCERTAINTY_MARKERS: &[&str] = &[
    "sure", "unsure", "if", "whether", "maybe", "perhaps", "possibly", "might",
];

/// Concerning phrases shared by every category
const GENERAL_CONCERNING: &[&str] = &[
    "severe",
    "worse",
    "worsening",
    "emergency",
    "unbearable",
    "unwell",
    "terrible",
];

/// Positive phrases shared by every category
const GENERAL_POSITIVE: &[&str] = &[
    "fine",
    "good",
    "great",
    "excellent",
    "okay",
    "ok",
    "alright",
    "normal",
    "better",
    "improving",
    "improved",
    "stable",
    "well",
    "no issues",
    "no problems",
    "no concerns",
    "all good",
    "no symptoms",
];

const CARDIAC_CONCERNING: &[&str] = &[
    "chest pain",
    "chest discomfort",
    "chest tightness",
    "tight chest",
    "tightness",
    "chest pressure",
    "pressure in my chest",
    "pain",
    "aching",
    "palpitations",
    "racing heart",
    "heart racing",
    "rapid heartbeat",
    "irregular heartbeat",
    "skipped beats",
    "fluttering",
    "pounding",
    "fainting",
    "fainted",
    "lightheaded",
    "light-headed",
    "dizziness",
    "dizzy",
    "sweating",
    "cold sweat",
    "radiating",
    "jaw pain",
    "arm pain",
];

const CARDIAC_POSITIVE: &[&str] = &[
    "no pain",
    "pain free",
    "pain-free",
    "feeling good",
    "feeling better",
    "feeling fine",
    "feel good",
    "comfortable",
    "heart feels fine",
    "heart feels good",
];

const RESPIRATORY_CONCERNING: &[&str] = &[
    "shortness of breath",
    "short of breath",
    "out of breath",
    "breathless",
    "difficulty breathing",
    "trouble breathing",
    "hard to breathe",
    "can't breathe",
    "cannot breathe",
    "can't catch my breath",
    "gasping",
    "winded",
    "wheezing",
    "wheeze",
    "coughing",
    "cough",
    "swelling",
    "swollen",
    "puffy",
    "breathless at rest",
    "short of breath at rest",
    "short of breath lying flat",
    "can't lie flat",
    "cannot lie flat",
];

const RESPIRATORY_POSITIVE: &[&str] = &[
    "breathing fine",
    "breathing well",
    "breathing normally",
    "breathing is fine",
    "breathing is good",
    "breathing is normal",
    "breathe easily",
    "easy breathing",
    "no swelling",
    "clear",
];

const MEDICATION_CONCERNING: &[&str] = &[
    "missed",
    "miss",
    "missing",
    "skipped",
    "skipping",
    "skip",
    "forgot",
    "forget",
    "forgetting",
    "stopped taking",
    "stopped",
    "not taking",
    "ran out",
    "run out",
    "can't afford",
    "cannot afford",
    "side effect",
    "side effects",
    "reaction",
    "dizzy",
    "dizziness",
    "nausea",
    "nauseous",
    "vomiting",
    "bleeding",
    "bruising",
    "rash",
];

const MEDICATION_POSITIVE: &[&str] = &[
    "as prescribed",
    "as directed",
    "taking all",
    "taking them",
    "taking my",
    "taking everything",
    "on schedule",
    "every day",
    "daily",
    "compliant",
    "following",
    "tolerating",
    "no side effects",
];

const ACTIVITY_CONCERNING: &[&str] = &[
    "can't walk",
    "cannot walk",
    "can barely",
    "barely",
    "unable",
    "can't",
    "cannot",
    "struggle",
    "struggling",
    "too tired",
    "very tired",
    "exhausted",
    "exhaustion",
    "fatigue",
    "fatigued",
    "weak",
    "weakness",
    "no energy",
    "bed rest",
    "bedridden",
    "stuck in bed",
    "out of breath",
];

const ACTIVITY_POSITIVE: &[&str] = &[
    "walked",
    "walking",
    "walk daily",
    "miles",
    "climb stairs",
    "climbing stairs",
    "climbed",
    "stairs without",
    "active",
    "good energy",
    "more energy",
    "energetic",
    "exercise",
    "exercising",
    "chores",
    "daily activities",
    "stronger",
    "getting stronger",
];

/// Phrase tables for one category
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub category: Category,
    pub concerning: Vec<&'static str>,
    pub positive: Vec<&'static str>,
    /// Whether numeric pain ratings ("7/10") feed the concerning signal
    pub tracks_pain_scale: bool,
}

impl Lexicon {
    /// Build the lexicon for a category, merging in the general lists
    pub fn for_category(category: Category) -> Self {
        let (specific_concerning, specific_positive, tracks_pain_scale) = match category {
            Category::Cardiac => (CARDIAC_CONCERNING, CARDIAC_POSITIVE, true),
            Category::Respiratory => (RESPIRATORY_CONCERNING, RESPIRATORY_POSITIVE, false),
            Category::Medication => (MEDICATION_CONCERNING, MEDICATION_POSITIVE, false),
            Category::Activity => (ACTIVITY_CONCERNING, ACTIVITY_POSITIVE, false),
        };

        Self {
            category,
            concerning: merge(specific_concerning, GENERAL_CONCERNING),
            positive: merge(specific_positive, GENERAL_POSITIVE),
            tracks_pain_scale,
        }
    }
}

fn merge(specific: &[&'static str], general: &[&'static str]) -> Vec<&'static str> {
    let mut phrases: Vec<&'static str> = specific.to_vec();
    for phrase in general {
        if !phrases.contains(phrase) {
            phrases.push(phrase);
        }
    }
    phrases
}

/// Whether a word negates what follows it
pub fn is_negation_marker(word: &str) -> bool {
    NEGATION_MARKERS.contains(&word)
}

/// Whether a word closes the scope of an earlier negation
pub fn is_scope_terminator(word: &str) -> bool {
    SCOPE_TERMINATORS.contains(&word)
}

pub fn is_uncertainty_marker(word: &str) -> bool {
    UNCERTAINTY_MARKERS.contains(&word)
}
