//! # Analysis Module
//!
//! Rule-based analysis of questionnaire responses.
//! Classifies each free-text answer, then derives a risk level, a recovery
//! stage and a summary for clinician review.
//!
//! ## Components
//! - `lexicon`: Concerning/positive phrase tables per category
//! - `matcher`: Phrase matching, negation scope, pain ratings
//! - `category`: Generic per-category classifier
//! - `outcome`: Risk level, recovery stage and overall status
//! - `summary`: Recommendations and summary formatting
//! - `report`: Input and output data structures
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod category;
pub mod lexicon;
pub mod matcher;
pub mod outcome;
pub mod report;
pub mod summary;

pub use analyzer::{AnalyzerConfig, AssessmentAnalyzer};
pub use category::{Category, CategoryAnalyzer, CategoryResult, CategoryStatus};
pub use lexicon::Lexicon;
pub use outcome::{OverallStatus, Outcome, RecoveryStage, RiskLevel};
pub use report::{AssessmentInput, AssessmentReport};
