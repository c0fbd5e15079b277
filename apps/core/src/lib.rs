//! Cardiac post-care self-assessment core.
//!
//! Patients answer four free-text questions after a cardiac procedure; the
//! [`analysis`] module classifies each answer, derives a risk level and a
//! recovery stage, and formats a clinician-facing summary. The surrounding
//! modules store accounts and assessments in SQLite.

pub mod accounts;
pub mod analysis;
pub mod assessments;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod questionnaire;
pub mod telemetry;

#[cfg(test)]
mod tests;
