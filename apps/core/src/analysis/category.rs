//! Category classification.
//!
//! One generic analyzer, parameterized by a [`Lexicon`], classifies a single
//! free-text response as positive, concerning or neutral.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::Lexicon;
use super::matcher::{self, Polarity};

/// Lowest pain rating that rules out a positive classification
pub const MODERATE_PAIN_FLOOR: u8 = 4;

/// Questionnaire area a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cardiac,
    Respiratory,
    Medication,
    Activity,
}

impl Category {
    /// All categories in questionnaire order
    pub const ALL: [Category; 4] = [
        Category::Cardiac,
        Category::Respiratory,
        Category::Medication,
        Category::Activity,
    ];

    /// Label used in the summary
    pub fn label(&self) -> &'static str {
        match self {
            Category::Cardiac => "Cardiac Function",
            Category::Respiratory => "Respiratory Status",
            Category::Medication => "Medication Management",
            Category::Activity => "Physical Activity",
        }
    }

    /// Cardiac and respiratory findings weigh more than the others
    pub fn is_high_weight(&self) -> bool {
        matches!(self, Category::Cardiac | Category::Respiratory)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification outcome of one response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Positive,
    Concerning,
    Neutral,
}

impl CategoryStatus {
    pub fn tag(&self) -> &'static str {
        match self {
            CategoryStatus::Positive => "POSITIVE",
            CategoryStatus::Concerning => "CONCERNING",
            CategoryStatus::Neutral => "NEUTRAL",
        }
    }
}

/// Result of classifying one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub status: CategoryStatus,
    /// Short human-readable reason for the status
    pub explanation: String,
    /// Concerning phrases found outside any negation
    pub concerning: Vec<String>,
    /// Concerning phrases the patient negated
    pub denied: Vec<String>,
    /// Positive phrases found outside any negation
    pub reassuring: Vec<String>,
    /// Highest pain rating mentioned (0-10), for categories that track one
    pub pain_score: Option<u8>,
    /// Whether the response contained any text at all
    pub has_response: bool,
}

impl CategoryResult {
    /// Result for a blank response
    pub fn no_response(category: Category) -> Self {
        Self {
            category,
            status: CategoryStatus::Neutral,
            explanation: "No response provided".to_string(),
            concerning: vec![],
            denied: vec![],
            reassuring: vec![],
            pain_score: None,
            has_response: false,
        }
    }

    pub fn is_concerning(&self) -> bool {
        self.status == CategoryStatus::Concerning
    }

    pub fn is_positive(&self) -> bool {
        self.status == CategoryStatus::Positive
    }
}

/// Keyword and negation based analyzer for one category
#[derive(Debug, Clone)]
pub struct CategoryAnalyzer {
    lexicon: Lexicon,
    negation_window: usize,
    pain_alert_threshold: u8,
}

impl CategoryAnalyzer {
    pub fn new(lexicon: Lexicon, negation_window: usize, pain_alert_threshold: u8) -> Self {
        Self {
            lexicon,
            negation_window,
            pain_alert_threshold,
        }
    }

    pub fn category(&self) -> Category {
        self.lexicon.category
    }

    /// Classify a single response
    pub fn classify(&self, text: &str) -> CategoryResult {
        let category = self.lexicon.category;
        let normalized = matcher::normalize(text);

        if normalized.is_empty() {
            return CategoryResult::no_response(category);
        }

        let mut concerning = Vec::new();
        let mut denied = Vec::new();
        let mut reassuring = Vec::new();

        for m in matcher::scan(
            &normalized,
            &self.lexicon.concerning,
            &self.lexicon.positive,
            self.negation_window,
        ) {
            // A negated positive phrase ("not fine") carries no signal
            let bucket = match (m.polarity, m.negated) {
                (Polarity::Concerning, false) => &mut concerning,
                (Polarity::Concerning, true) => &mut denied,
                (Polarity::Positive, false) => &mut reassuring,
                (Polarity::Positive, true) => continue,
            };
            push_unique(bucket, m.phrase.to_string());
        }

        let pain_score = if self.lexicon.tracks_pain_scale {
            matcher::extract_pain_rating(&normalized)
        } else {
            None
        };
        if let Some(score) = pain_score {
            // A rated mention is judged by its rating, not by the bare word
            concerning.retain(|phrase| phrase != "pain");
            if score >= self.pain_alert_threshold {
                push_unique(&mut concerning, format!("pain rated {}/10", score));
            }
        }

        // Ratings between the moderate floor and the alert threshold call
        // for monitoring, never for reassurance
        let moderate_pain = pain_score
            .filter(|score| (MODERATE_PAIN_FLOOR..self.pain_alert_threshold).contains(score));

        let status = if !concerning.is_empty() {
            CategoryStatus::Concerning
        } else if moderate_pain.is_some() {
            CategoryStatus::Neutral
        } else if !reassuring.is_empty() || !denied.is_empty() {
            CategoryStatus::Positive
        } else {
            CategoryStatus::Neutral
        };

        let explanation = match moderate_pain {
            Some(score) if status == CategoryStatus::Neutral => format!(
                "Moderate pain rated {}/10 - continue close monitoring",
                score
            ),
            _ => explain(status, &concerning, &denied, &reassuring),
        };

        CategoryResult {
            category,
            status,
            explanation,
            concerning,
            denied,
            reassuring,
            pain_score,
            has_response: true,
        }
    }
}

fn push_unique(list: &mut Vec<String>, phrase: String) {
    if !list.contains(&phrase) {
        list.push(phrase);
    }
}

fn explain(
    status: CategoryStatus,
    concerning: &[String],
    denied: &[String],
    reassuring: &[String],
) -> String {
    match status {
        CategoryStatus::Concerning => format!("Concerning: {}", concerning.join(", ")),
        CategoryStatus::Positive => {
            let mut parts = Vec::new();
            if !denied.is_empty() {
                parts.push(format!("Denies {}", denied.join(", ")));
            }
            if !reassuring.is_empty() {
                parts.push(format!("Reassuring: {}", reassuring.join(", ")));
            }
            parts.join("; ")
        }
        CategoryStatus::Neutral => {
            "No clear signal in response - requires clinical clarification".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(category: Category) -> CategoryAnalyzer {
        CategoryAnalyzer::new(Lexicon::for_category(category), 4, 8)
    }

    #[test]
    fn test_chest_pain_is_concerning() {
        let result = analyzer(Category::Cardiac).classify("I have chest pain");
        assert_eq!(result.status, CategoryStatus::Concerning);
        assert_eq!(result.concerning, vec!["chest pain"]);
        assert_eq!(result.explanation, "Concerning: chest pain");
    }

    #[test]
    fn test_negated_chest_pain_is_positive() {
        let cardiac = analyzer(Category::Cardiac);

        for text in ["I have no chest pain", "I haven't had chest pain", "no chest pain"] {
            let result = cardiac.classify(text);
            assert_eq!(result.status, CategoryStatus::Positive, "for '{}'", text);
            assert_eq!(result.denied, vec!["chest pain"]);
            assert!(result.concerning.is_empty());
        }
    }

    #[test]
    fn test_typographic_apostrophe_negates() {
        let result = analyzer(Category::Cardiac).classify("I haven\u{2019}t had chest pain");
        assert_eq!(result.status, CategoryStatus::Positive);
    }

    #[test]
    fn test_concerning_takes_precedence() {
        let result = analyzer(Category::Cardiac).classify("Feeling better overall, some chest pain");
        assert_eq!(result.status, CategoryStatus::Concerning);
        assert!(!result.reassuring.is_empty());
    }

    #[test]
    fn test_empty_and_blank_input() {
        for text in ["", "   ", "\n\t"] {
            let result = analyzer(Category::Respiratory).classify(text);
            assert_eq!(result.status, CategoryStatus::Neutral);
            assert!(!result.has_response);
            assert_eq!(result.explanation, "No response provided");
        }
    }

    #[test]
    fn test_unclear_response_is_neutral() {
        let result = analyzer(Category::Medication).classify("I saw my pharmacist on Tuesday");
        assert_eq!(result.status, CategoryStatus::Neutral);
        assert!(result.has_response);
    }

    #[test]
    fn test_negated_positive_is_ignored() {
        let result = analyzer(Category::Activity).classify("not feeling good");
        assert_eq!(result.status, CategoryStatus::Neutral);
    }

    #[test]
    fn test_pain_rating_threshold() {
        let cardiac = analyzer(Category::Cardiac);

        let high = cardiac.classify("discomfort comes and goes, about 8/10");
        assert_eq!(high.status, CategoryStatus::Concerning);
        assert_eq!(high.pain_score, Some(8));
        assert!(high.concerning.contains(&"pain rated 8/10".to_string()));

        let low = cardiac.classify("feeling good, maybe 1/10 at worst");
        assert_eq!(low.pain_score, Some(1));
        assert_eq!(low.status, CategoryStatus::Positive);
        assert!(!low.concerning.iter().any(|p| p.starts_with("pain rated")));
    }

    #[test]
    fn test_moderate_pain_needs_monitoring() {
        let result = analyzer(Category::Cardiac).classify("feeling good, pain level 5 in the evening");
        assert_eq!(result.pain_score, Some(5));
        assert_eq!(result.status, CategoryStatus::Neutral);
        assert!(result.concerning.is_empty());
        assert_eq!(
            result.explanation,
            "Moderate pain rated 5/10 - continue close monitoring"
        );
    }

    #[test]
    fn test_unrelated_levels_are_not_pain() {
        let result = analyzer(Category::Cardiac).classify("stress level 5 but feeling good");
        assert_eq!(result.pain_score, None);
        assert_eq!(result.status, CategoryStatus::Positive);
    }

    #[test]
    fn test_context_words_stay_harmless() {
        let cardiac = analyzer(Category::Cardiac);
        assert_eq!(
            cardiac.classify("My blood pressure has been normal").status,
            CategoryStatus::Positive
        );
        assert_eq!(
            cardiac.classify("Some pressure in my chest at night").status,
            CategoryStatus::Concerning
        );

        let respiratory = analyzer(Category::Respiratory);
        assert_eq!(
            respiratory.classify("Breathing is fine at rest").status,
            CategoryStatus::Positive
        );
        assert_ne!(
            respiratory.classify("I can sleep lying flat comfortably").status,
            CategoryStatus::Concerning
        );
        assert_eq!(
            respiratory.classify("Short of breath lying flat").status,
            CategoryStatus::Concerning
        );
    }

    #[test]
    fn test_answer_and_hedge_keep_symptom() {
        let cardiac = analyzer(Category::Cardiac);
        for text in ["No, I have chest pain", "I'm not sure if it's chest pain"] {
            let result = cardiac.classify(text);
            assert_eq!(result.status, CategoryStatus::Concerning, "for '{}'", text);
            assert_eq!(result.concerning, vec!["chest pain"]);
        }
    }

    #[test]
    fn test_phrases_reported_once() {
        let result = analyzer(Category::Medication).classify("missed one, then missed another");
        assert_eq!(result.concerning, vec!["missed"]);
    }

    #[test]
    fn test_contrast_ends_negation() {
        let result = analyzer(Category::Respiratory).classify("No cough but short of breath on stairs");
        assert_eq!(result.status, CategoryStatus::Concerning);
        assert_eq!(result.denied, vec!["cough"]);
        assert_eq!(result.concerning, vec!["short of breath"]);
    }
}
