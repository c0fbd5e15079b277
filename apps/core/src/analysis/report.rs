//! Input and output structures of an assessment analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::category::{Category, CategoryResult};
use super::outcome::{OverallStatus, RecoveryStage, RiskLevel};

/// Treat null, missing or non-string JSON values as an empty response
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => text,
        _ => String::new(),
    })
}

/// The four free-text questionnaire responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default, deserialize_with = "lenient_text")]
    pub cardiac_symptoms: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub breathing_physical: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub medication_response: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub activity_fatigue: String,
}

impl AssessmentInput {
    pub fn new(
        cardiac_symptoms: impl Into<String>,
        breathing_physical: impl Into<String>,
        medication_response: impl Into<String>,
        activity_fatigue: impl Into<String>,
    ) -> Self {
        Self {
            cardiac_symptoms: cardiac_symptoms.into(),
            breathing_physical: breathing_physical.into(),
            medication_response: medication_response.into(),
            activity_fatigue: activity_fatigue.into(),
        }
    }

    /// Response text for a category
    pub fn response(&self, category: Category) -> &str {
        match category {
            Category::Cardiac => &self.cardiac_symptoms,
            Category::Respiratory => &self.breathing_physical,
            Category::Medication => &self.medication_response,
            Category::Activity => &self.activity_fatigue,
        }
    }

    pub fn set_response(&mut self, category: Category, text: impl Into<String>) {
        let slot = match category {
            Category::Cardiac => &mut self.cardiac_symptoms,
            Category::Respiratory => &mut self.breathing_physical,
            Category::Medication => &mut self.medication_response,
            Category::Activity => &mut self.activity_fatigue,
        };
        *slot = text.into();
    }

    pub fn is_blank(&self) -> bool {
        Category::ALL
            .iter()
            .all(|c| self.response(*c).trim().is_empty())
    }
}

/// Complete result of analyzing one assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// One result per category, in questionnaire order
    pub results: Vec<CategoryResult>,
    pub risk_level: RiskLevel,
    pub recovery_stage: RecoveryStage,
    pub overall_status: OverallStatus,
    pub recommendations: Vec<String>,
    /// Formatted text stored as the assessment summary
    pub summary: String,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentReport {
    pub fn result(&self, category: Category) -> Option<&CategoryResult> {
        self.results.iter().find(|r| r.category == category)
    }

    pub fn concerning_categories(&self) -> Vec<Category> {
        self.results
            .iter()
            .filter(|r| r.is_concerning())
            .map(|r| r.category)
            .collect()
    }

    /// One-line description for logging
    pub fn log_line(&self) -> String {
        format!(
            "Risk: {}, Stage: {}, Concerns: {}",
            self.risk_level,
            self.recovery_stage,
            self.concerning_categories().len()
        )
    }
}
