use crate::config::AppConfig;
use crate::analysis::RiskLevel;
use crate::models::{
    AssessmentStats, DoctorSummary, NewAssessment, NewUser, PatientAssessment, User, UserRole,
};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        user_type TEXT NOT NULL CHECK (user_type IN ('patient', 'doctor')),
        full_name TEXT NOT NULL,
        doctor_id INTEGER,
        created_at INTEGER NOT NULL,
        FOREIGN KEY(doctor_id) REFERENCES users(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS patient_assessments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        doctor_id INTEGER,
        timestamp INTEGER NOT NULL,
        cardiac_symptoms TEXT NOT NULL DEFAULT '',
        breathing_physical TEXT NOT NULL DEFAULT '',
        medication_response TEXT NOT NULL DEFAULT '',
        activity_fatigue TEXT NOT NULL DEFAULT '',
        ai_summary TEXT NOT NULL,
        risk_level TEXT NOT NULL DEFAULT 'medium' CHECK (risk_level IN ('low', 'medium', 'high')),
        FOREIGN KEY(patient_id) REFERENCES users(id),
        FOREIGN KEY(doctor_id) REFERENCES users(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_assessments_patient ON patient_assessments(patient_id)",
    "CREATE INDEX IF NOT EXISTS idx_assessments_doctor ON patient_assessments(doctor_id)",
];

const ASSESSMENT_COLUMNS: &str = r#"
    SELECT a.id, a.patient_id, a.doctor_id, a.timestamp,
           a.cardiac_symptoms, a.breathing_physical, a.medication_response, a.activity_fatigue,
           a.ai_summary, a.risk_level, u.full_name AS patient_name
    FROM patient_assessments a
    JOIN users u ON u.id = a.patient_id
"#;

/// Open (creating if needed) the configured database file and apply the schema.
pub async fn init_db(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    info!("Initializing database at: {}", config.database_url());

    let pool = connect(config).await?;
    migrate(&pool).await?;

    info!("Database initialized and migrations applied.");
    Ok(pool)
}

pub async fn connect(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    open(&config.database_url(), config.max_connections).await
}

/// Open a pool on an arbitrary SQLite URL, e.g. `sqlite::memory:`.
pub async fn open(db_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(db_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create tables and indexes; safe to run on every start.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

// --- Users ---

pub async fn insert_user(
    pool: &SqlitePool,
    user: &NewUser,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let created_at = Utc::now().timestamp();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash, user_type, full_name, doctor_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, username, email, password_hash, user_type, full_name, doctor_id, created_at
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(password_hash)
    .bind(user.role.as_str())
    .bind(&user.full_name)
    .bind(user.doctor_id)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, user_type, full_name, doctor_id, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, user_type, full_name, doctor_id, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// True when either the username or the email is already registered.
pub async fn user_exists(pool: &SqlitePool, username: &str, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ? OR email = ?")
            .bind(username)
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub async fn list_doctors(pool: &SqlitePool) -> Result<Vec<DoctorSummary>, sqlx::Error> {
    sqlx::query_as::<_, DoctorSummary>(
        r#"
        SELECT id, full_name
        FROM users
        WHERE user_type = ?
        ORDER BY full_name ASC
        "#,
    )
    .bind(UserRole::Doctor.as_str())
    .fetch_all(pool)
    .await
}

// --- Assessments ---

pub async fn insert_assessment(
    pool: &SqlitePool,
    assessment: &NewAssessment,
) -> Result<PatientAssessment, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO patient_assessments
            (patient_id, doctor_id, timestamp, cardiac_symptoms, breathing_physical,
             medication_response, activity_fatigue, ai_summary, risk_level)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(assessment.patient_id)
    .bind(assessment.doctor_id)
    .bind(assessment.timestamp)
    .bind(&assessment.cardiac_symptoms)
    .bind(&assessment.breathing_physical)
    .bind(&assessment.medication_response)
    .bind(&assessment.activity_fatigue)
    .bind(&assessment.ai_summary)
    .bind(assessment.risk_level.as_str())
    .fetch_one(pool)
    .await?;

    get_assessment(pool, id).await
}

pub async fn get_assessment(pool: &SqlitePool, id: i64) -> Result<PatientAssessment, sqlx::Error> {
    sqlx::query_as::<_, PatientAssessment>(&format!("{} WHERE a.id = ?", ASSESSMENT_COLUMNS))
        .bind(id)
        .fetch_one(pool)
        .await
}

/// A patient's own assessments, newest first, optionally only one risk level.
pub async fn assessments_for_patient(
    pool: &SqlitePool,
    patient_id: i64,
    risk: Option<RiskLevel>,
) -> Result<Vec<PatientAssessment>, sqlx::Error> {
    let risk = risk.map(|r| r.as_str());
    sqlx::query_as::<_, PatientAssessment>(&format!(
        "{} WHERE a.patient_id = ? AND (? IS NULL OR a.risk_level = ?) \
         ORDER BY a.timestamp DESC, a.id DESC",
        ASSESSMENT_COLUMNS
    ))
    .bind(patient_id)
    .bind(risk)
    .bind(risk)
    .fetch_all(pool)
    .await
}

/// Assessments of the patients assigned to a doctor, newest first,
/// optionally only one risk level.
pub async fn assessments_for_doctor(
    pool: &SqlitePool,
    doctor_id: i64,
    risk: Option<RiskLevel>,
) -> Result<Vec<PatientAssessment>, sqlx::Error> {
    let risk = risk.map(|r| r.as_str());
    sqlx::query_as::<_, PatientAssessment>(&format!(
        "{} WHERE a.doctor_id = ? AND (? IS NULL OR a.risk_level = ?) \
         ORDER BY a.timestamp DESC, a.id DESC",
        ASSESSMENT_COLUMNS
    ))
    .bind(doctor_id)
    .bind(risk)
    .bind(risk)
    .fetch_all(pool)
    .await
}

/// The latest assessments assigned to a doctor.
pub async fn recent_assessments(
    pool: &SqlitePool,
    doctor_id: i64,
    limit: i64,
) -> Result<Vec<PatientAssessment>, sqlx::Error> {
    sqlx::query_as::<_, PatientAssessment>(&format!(
        "{} WHERE a.doctor_id = ? ORDER BY a.timestamp DESC, a.id DESC LIMIT ?",
        ASSESSMENT_COLUMNS
    ))
    .bind(doctor_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Dashboard counters over a doctor's assigned assessments.
///
/// `since` is the unix timestamp where "today" starts.
pub async fn assessment_stats(
    pool: &SqlitePool,
    doctor_id: i64,
    since: i64,
) -> Result<AssessmentStats, sqlx::Error> {
    sqlx::query_as::<_, AssessmentStats>(
        r#"
        SELECT COUNT(DISTINCT patient_id) AS total_patients,
               COUNT(*) AS total_assessments,
               COUNT(DISTINCT CASE WHEN risk_level = ? THEN patient_id END) AS high_risk_patients,
               COALESCE(SUM(CASE WHEN timestamp >= ? THEN 1 ELSE 0 END), 0) AS todays_assessments
        FROM patient_assessments
        WHERE doctor_id = ?
        "#,
    )
    .bind(RiskLevel::High.as_str())
    .bind(since)
    .bind(doctor_id)
    .fetch_one(pool)
    .await
}
