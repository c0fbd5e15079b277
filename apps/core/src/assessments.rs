use chrono::{NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::analysis::{AssessmentAnalyzer, AssessmentInput, AssessmentReport, RiskLevel};
use crate::database;
use crate::error::AppError;
use crate::models::{AssessmentStats, NewAssessment, PatientAssessment, User, UserRole};

/// Analyze a patient's responses and store them with the generated summary.
///
/// The record is assigned to the patient's doctor, if any. Doctors cannot
/// submit assessments.
pub async fn submit(
    pool: &SqlitePool,
    analyzer: &AssessmentAnalyzer,
    patient: &User,
    input: &AssessmentInput,
) -> Result<(PatientAssessment, AssessmentReport), AppError> {
    if patient.role() != UserRole::Patient {
        return Err(AppError::Authentication(
            "Only patients can submit assessments".to_string(),
        ));
    }

    let report = analyzer.analyze(input, Utc::now());

    let record = database::insert_assessment(
        pool,
        &NewAssessment {
            patient_id: patient.id,
            doctor_id: patient.doctor_id,
            timestamp: report.assessed_at.timestamp(),
            cardiac_symptoms: input.cardiac_symptoms.clone(),
            breathing_physical: input.breathing_physical.clone(),
            medication_response: input.medication_response.clone(),
            activity_fatigue: input.activity_fatigue.clone(),
            ai_summary: report.summary.clone(),
            risk_level: report.risk_level,
        },
    )
    .await?;

    info!(
        assessment_id = record.id,
        patient_id = patient.id,
        "Stored assessment ({})",
        report.log_line()
    );

    Ok((record, report))
}

/// Assessments visible to a user: their own for patients, their assigned
/// patients' for doctors. Newest first; `risk` keeps a single level.
pub async fn history(
    pool: &SqlitePool,
    user: &User,
    risk: Option<RiskLevel>,
) -> Result<Vec<PatientAssessment>, AppError> {
    let records = match user.role() {
        UserRole::Patient => database::assessments_for_patient(pool, user.id, risk).await?,
        UserRole::Doctor => database::assessments_for_doctor(pool, user.id, risk).await?,
    };
    Ok(records)
}

/// The latest assessments of a doctor's patients.
pub async fn recent(
    pool: &SqlitePool,
    doctor: &User,
    limit: i64,
) -> Result<Vec<PatientAssessment>, AppError> {
    require_doctor(doctor)?;
    Ok(database::recent_assessments(pool, doctor.id, limit.max(1)).await?)
}

/// Dashboard counters for a doctor. "Today" starts at UTC midnight.
pub async fn dashboard(pool: &SqlitePool, doctor: &User) -> Result<AssessmentStats, AppError> {
    require_doctor(doctor)?;
    let since = Utc::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp();
    Ok(database::assessment_stats(pool, doctor.id, since).await?)
}

fn require_doctor(user: &User) -> Result<(), AppError> {
    if user.is_doctor() {
        Ok(())
    } else {
        Err(AppError::Authentication(
            "Only doctors can view the patient dashboard".to_string(),
        ))
    }
}
