//! Summary formatting and clinical recommendations.
//!
//! Pure string templating over already-derived values; no clock access, the
//! assessment timestamp is passed in.

use chrono::{DateTime, Utc};

use super::category::{Category, CategoryResult, CategoryStatus};
use super::outcome::{Outcome, RiskLevel};

/// Analysis method line shown in the clinical notes
const ANALYSIS_METHOD: &str = "Keyword recognition with negation handling";

/// Fixed recommendation lines for a risk level
pub fn risk_recommendations(risk_level: RiskLevel) -> &'static [&'static str] {
    match risk_level {
        RiskLevel::High => &[
            "Seek immediate medical attention",
            "Contact your cardiac care team today",
        ],
        RiskLevel::Medium => &[
            "Arrange a follow-up review with your care team within 48 hours",
            "Monitor symptoms daily and report any changes",
        ],
        RiskLevel::Low => &[
            "Continue current treatment plan",
            "Regular follow-up monitoring",
        ],
    }
}

fn category_action(category: Category, status: CategoryStatus) -> Option<&'static str> {
    match (category, status) {
        (Category::Cardiac, CategoryStatus::Concerning) => Some("Immediate cardiac evaluation"),
        (Category::Respiratory, CategoryStatus::Concerning) => {
            Some("Respiratory function assessment")
        }
        (Category::Medication, CategoryStatus::Concerning) => {
            Some("Medication review and adjustment")
        }
        (Category::Activity, CategoryStatus::Concerning) => Some("Physical therapy evaluation"),
        (Category::Cardiac, CategoryStatus::Neutral) => Some("Enhanced cardiac monitoring"),
        (Category::Respiratory, CategoryStatus::Neutral) => Some("Monitor breathing patterns"),
        (Category::Medication, CategoryStatus::Neutral) => Some("Medication compliance support"),
        (Category::Activity, CategoryStatus::Neutral) => Some("Gradual activity progression"),
        (_, CategoryStatus::Positive) => None,
    }
}

/// Category-specific actions followed by the risk level lines
pub fn recommendations(results: &[CategoryResult], risk_level: RiskLevel) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    if results.iter().all(|r| !r.has_response) {
        lines.push("Repeat the assessment with complete responses".to_string());
    } else {
        lines.extend(
            results
                .iter()
                .filter(|r| r.has_response)
                .filter_map(|r| category_action(r.category, r.status))
                .map(str::to_string),
        );
    }

    lines.extend(
        risk_recommendations(risk_level)
            .iter()
            .map(|s| s.to_string()),
    );
    lines
}

/// Render the stored summary text
pub fn format_summary(
    results: &[CategoryResult],
    outcome: &Outcome,
    recommendations: &[String],
    assessed_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str("PATIENT ASSESSMENT SUMMARY\n\n");
    out.push_str(&format!(
        "OVERALL STATUS: {}\n",
        outcome.overall_status.description()
    ));
    out.push_str(&format!(
        "RISK LEVEL: {}\n\n",
        outcome.risk_level.as_str().to_uppercase()
    ));

    out.push_str("DETAILED ASSESSMENT:\n");
    for result in results {
        out.push_str(&format!(
            "• {}: [{}] {}\n",
            result.category.label(),
            result.status.tag(),
            result.explanation
        ));
    }

    out.push_str(&format!(
        "\nRECOVERY ASSESSMENT: {}\n\n",
        outcome.recovery_stage.description()
    ));

    out.push_str("RECOMMENDATIONS:\n");
    for line in recommendations {
        out.push_str(&format!("• {}\n", line));
    }

    out.push_str("\nCLINICAL NOTES:\n");
    out.push_str(&format!(
        "• Assessment date: {}\n",
        assessed_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!("• Analysis method: {}\n", ANALYSIS_METHOD));
    out.push_str("• Next steps: Continue monitoring per established care plan");

    out
}

/// Shorten a raw response for listings, appending "..." when cut
pub fn truncate_response(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", head.trim_end())
}
