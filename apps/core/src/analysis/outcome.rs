//! Risk level, recovery stage and overall status.
//!
//! All three are derived together from the same four category results in
//! [`Outcome::derive`], so a high risk is never paired with an advanced stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::CategoryResult;

/// Coarse severity of an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Value stored in the `risk_level` column
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{}'", other)),
        }
    }
}

/// Coarse progress of a patient's recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStage {
    Early,
    Intermediate,
    Advanced,
}

impl RecoveryStage {
    pub fn description(&self) -> &'static str {
        match self {
            RecoveryStage::Early => "Early recovery stage - requires intensive monitoring and support",
            RecoveryStage::Intermediate => {
                "Intermediate recovery stage - steady progress with good indicators"
            }
            RecoveryStage::Advanced => {
                "Advanced recovery stage - patient demonstrating excellent progress"
            }
        }
    }
}

impl fmt::Display for RecoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecoveryStage::Early => "early",
            RecoveryStage::Intermediate => "intermediate",
            RecoveryStage::Advanced => "advanced",
        };
        write!(f, "{}", name)
    }
}

/// One-line verdict across all categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    InsufficientData,
    MultipleConcerns,
    SingleConcern,
    ExcellentProgress,
    GoodProgress,
    MixedIndicators,
}

impl OverallStatus {
    pub fn description(&self) -> &'static str {
        match self {
            OverallStatus::InsufficientData => {
                "Insufficient data - no responses were provided for analysis"
            }
            OverallStatus::MultipleConcerns => {
                "Multiple areas of concern requiring immediate medical attention"
            }
            OverallStatus::SingleConcern => {
                "One area of concern noted - requires monitoring and possible intervention"
            }
            OverallStatus::ExcellentProgress => {
                "Patient showing excellent recovery progress across all major areas"
            }
            OverallStatus::GoodProgress => {
                "Patient showing good recovery progress with stable condition"
            }
            OverallStatus::MixedIndicators => {
                "Mixed recovery indicators - requires continued close monitoring"
            }
        }
    }
}

/// Aggregate verdict over four category results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub risk_level: RiskLevel,
    pub recovery_stage: RecoveryStage,
    pub overall_status: OverallStatus,
}

impl Outcome {
    /// Derive risk, stage and status from the same results
    pub fn derive(results: &[CategoryResult]) -> Self {
        let risk_level = assess_risk(results);
        let recovery_stage = assess_stage(results, risk_level);
        let overall_status = assess_overall(results);

        Self {
            risk_level,
            recovery_stage,
            overall_status,
        }
    }
}

/// Cardiac or respiratory concerns force high risk; any other concern
/// raises it to medium
pub fn assess_risk(results: &[CategoryResult]) -> RiskLevel {
    let high_weight = results
        .iter()
        .filter(|r| r.is_concerning() && r.category.is_high_weight())
        .count();
    let medium_weight = results
        .iter()
        .filter(|r| r.is_concerning() && !r.category.is_high_weight())
        .count();

    if high_weight > 0 {
        RiskLevel::High
    } else if medium_weight > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Majority rule over the same results used for risk
pub fn assess_stage(results: &[CategoryResult], risk_level: RiskLevel) -> RecoveryStage {
    let positive = results.iter().filter(|r| r.is_positive()).count();
    let concerning = results.iter().filter(|r| r.is_concerning()).count();

    if risk_level == RiskLevel::High || concerning >= 2 {
        RecoveryStage::Early
    } else if !results.is_empty() && positive == results.len() {
        RecoveryStage::Advanced
    } else if positive * 2 > results.len() && concerning <= 1 {
        RecoveryStage::Intermediate
    } else {
        RecoveryStage::Early
    }
}

pub fn assess_overall(results: &[CategoryResult]) -> OverallStatus {
    if results.iter().all(|r| !r.has_response) {
        return OverallStatus::InsufficientData;
    }

    let positive = results.iter().filter(|r| r.is_positive()).count();
    let concerning = results.iter().filter(|r| r.is_concerning()).count();

    match (concerning, positive) {
        (c, _) if c >= 2 => OverallStatus::MultipleConcerns,
        (1, _) => OverallStatus::SingleConcern,
        (_, p) if p >= 3 => OverallStatus::ExcellentProgress,
        (_, 2) => OverallStatus::GoodProgress,
        _ => OverallStatus::MixedIndicators,
    }
}
