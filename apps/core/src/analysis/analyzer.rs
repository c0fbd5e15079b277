//! Assessment Analyzer - Main orchestrator for the analysis module.
//!
//! Runs the four category analyzers, derives risk/stage/status in a single
//! step and renders the summary. Holds no state between calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use super::category::{Category, CategoryAnalyzer, CategoryResult};
use super::lexicon::Lexicon;
use super::outcome::Outcome;
use super::report::{AssessmentInput, AssessmentReport};
use super::summary;

/// Words inspected before a phrase when looking for a negation
pub const DEFAULT_NEGATION_WINDOW: usize = 4;

/// Pain rating (out of 10) at which a reported score becomes concerning
pub const DEFAULT_PAIN_ALERT_THRESHOLD: u8 = 8;

/// Tuning parameters of the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    #[validate(range(min = 1, max = 10))]
    pub negation_window: usize,
    #[validate(range(max = 10))]
    pub pain_alert_threshold: u8,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            negation_window: DEFAULT_NEGATION_WINDOW,
            pain_alert_threshold: DEFAULT_PAIN_ALERT_THRESHOLD,
        }
    }
}

/// Main analyzer turning four responses into an [`AssessmentReport`]
#[derive(Debug, Clone)]
pub struct AssessmentAnalyzer {
    analyzers: Vec<CategoryAnalyzer>,
    config: AnalyzerConfig,
}

impl Default for AssessmentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentAnalyzer {
    /// Create an analyzer with default tuning
    pub fn new() -> Self {
        Self::build(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom tuning
    pub fn with_config(config: AnalyzerConfig) -> Result<Self, crate::error::AppError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AnalyzerConfig) -> Self {
        let analyzers = Category::ALL
            .iter()
            .map(|category| {
                CategoryAnalyzer::new(
                    Lexicon::for_category(*category),
                    config.negation_window,
                    config.pain_alert_threshold,
                )
            })
            .collect();

        Self { analyzers, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Classify every response, in questionnaire order
    pub fn classify(&self, input: &AssessmentInput) -> Vec<CategoryResult> {
        self.analyzers
            .iter()
            .map(|analyzer| {
                let result = analyzer.classify(input.response(analyzer.category()));
                debug!(
                    category = ?result.category,
                    status = ?result.status,
                    "{}",
                    result.explanation
                );
                result
            })
            .collect()
    }

    /// Analyze an assessment taken at `assessed_at`
    pub fn analyze(&self, input: &AssessmentInput, assessed_at: DateTime<Utc>) -> AssessmentReport {
        // 1. Per-category classification
        let results = self.classify(input);

        // 2. Risk, stage and overall status from the same results
        let outcome = Outcome::derive(&results);

        // 3. Recommendations and summary text
        let recommendations = summary::recommendations(&results, outcome.risk_level);
        let summary = summary::format_summary(&results, &outcome, &recommendations, assessed_at);

        let report = AssessmentReport {
            results,
            risk_level: outcome.risk_level,
            recovery_stage: outcome.recovery_stage,
            overall_status: outcome.overall_status,
            recommendations,
            summary,
            assessed_at,
        };

        info!("Assessment analyzed: {}", report.log_line());
        report
    }

    /// Analyze an assessment taken now
    pub fn analyze_now(&self, input: &AssessmentInput) -> AssessmentReport {
        self.analyze(input, Utc::now())
    }
}
