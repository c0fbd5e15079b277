use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::analysis::RiskLevel;

/// Kind of account, stored in the `user_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Patient,
    Doctor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Patient => "patient",
            UserRole::Doctor => "doctor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patient" => Ok(UserRole::Patient),
            "doctor" => Ok(UserRole::Doctor),
            other => Err(format!("unknown user type '{}'", other)),
        }
    }
}

/// Represents a registered patient or doctor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Auto-incremented identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    /// Salted SHA-256 digest, never the plain password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Either "patient" or "doctor".
    pub user_type: String,
    /// Display name.
    pub full_name: String,
    /// Assigned doctor, for patients only.
    pub doctor_id: Option<i64>,
    /// Unix timestamp of registration.
    pub created_at: i64,
}

impl User {
    /// The parsed `user_type`; unknown values are treated as patients.
    pub fn role(&self) -> UserRole {
        self.user_type.parse().unwrap_or(UserRole::Patient)
    }

    pub fn is_doctor(&self) -> bool {
        self.role() == UserRole::Doctor
    }
}

/// Registration details, validated before insertion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: UserRole,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    pub doctor_id: Option<i64>,
}

/// Entry of the doctor directory shown at registration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DoctorSummary {
    pub id: i64,
    pub full_name: String,
}

/// Counters shown on a doctor's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AssessmentStats {
    pub total_patients: i64,
    pub total_assessments: i64,
    /// Patients with at least one high-risk assessment
    pub high_risk_patients: i64,
    pub todays_assessments: i64,
}

/// A stored assessment, joined with the patient's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PatientAssessment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    /// Unix timestamp of submission.
    pub timestamp: i64,
    pub cardiac_symptoms: String,
    pub breathing_physical: String,
    pub medication_response: String,
    pub activity_fatigue: String,
    /// Summary text produced by the analyzer, stored verbatim.
    pub ai_summary: String,
    /// "low", "medium" or "high".
    pub risk_level: String,
    pub patient_name: String,
}

impl PatientAssessment {
    /// The parsed `risk_level`; unreadable values are treated as medium,
    /// the column default.
    pub fn risk(&self) -> RiskLevel {
        self.risk_level.parse().unwrap_or(RiskLevel::Medium)
    }
}

/// Values written for a new assessment.
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub timestamp: i64,
    pub cardiac_symptoms: String,
    pub breathing_physical: String,
    pub medication_response: String,
    pub activity_fatigue: String,
    pub ai_summary: String,
    pub risk_level: RiskLevel,
}
