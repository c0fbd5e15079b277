//! Database Module Tests
//!
//! CRUD operations for users and assessments, and history ordering.

use super::memory_pool;
use crate::analysis::RiskLevel;
use crate::config::AppConfig;
use crate::database;
use crate::models::{AssessmentStats, NewAssessment, NewUser, UserRole};
use sqlx::sqlite::SqlitePool;
use tempfile::tempdir;

fn new_user(username: &str, role: UserRole, doctor_id: Option<i64>) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "password123".to_string(),
        role,
        full_name: format!("{} Smith", username),
        doctor_id,
    }
}

fn new_assessment(patient_id: i64, doctor_id: Option<i64>, timestamp: i64) -> NewAssessment {
    NewAssessment {
        patient_id,
        doctor_id,
        timestamp,
        cardiac_symptoms: "no chest pain".to_string(),
        breathing_physical: "breathing fine".to_string(),
        medication_response: "taking them".to_string(),
        activity_fatigue: "walked to the park".to_string(),
        ai_summary: "PATIENT ASSESSMENT SUMMARY".to_string(),
        risk_level: RiskLevel::Low,
    }
}

/// A doctor and one patient assigned to them
async fn seed(pool: &SqlitePool) -> (i64, i64) {
    let doctor = database::insert_user(pool, &new_user("drjones", UserRole::Doctor, None), "x$y")
        .await
        .expect("Failed to insert doctor");
    let patient = database::insert_user(
        pool,
        &new_user("alice", UserRole::Patient, Some(doctor.id)),
        "x$y",
    )
    .await
    .expect("Failed to insert patient");
    (doctor.id, patient.id)
}

#[cfg(test)]
mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let pool = memory_pool().await;

        let created =
            database::insert_user(&pool, &new_user("bob", UserRole::Patient, None), "salt$hash")
                .await
                .expect("Failed to insert user");
        assert!(created.id > 0);
        assert_eq!(created.user_type, "patient");
        assert_eq!(created.password_hash, "salt$hash");

        let found = database::find_user_by_username(&pool, "bob")
            .await
            .unwrap()
            .expect("User should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "bob@example.com");

        let by_id = database::get_user(&pool, created.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.username), Some("bob".to_string()));

        assert!(database::find_user_by_username(&pool, "nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unique_username() {
        let pool = memory_pool().await;
        database::insert_user(&pool, &new_user("carol", UserRole::Patient, None), "a$b")
            .await
            .unwrap();

        assert!(database::user_exists(&pool, "carol", "other@example.com").await.unwrap());
        assert!(database::user_exists(&pool, "other", "carol@example.com").await.unwrap());
        assert!(!database::user_exists(&pool, "other", "other@example.com").await.unwrap());

        let duplicate =
            database::insert_user(&pool, &new_user("carol", UserRole::Patient, None), "a$b").await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_list_doctors_only() {
        let pool = memory_pool().await;
        seed(&pool).await;
        database::insert_user(&pool, &new_user("adams", UserRole::Doctor, None), "a$b")
            .await
            .unwrap();

        let doctors = database::list_doctors(&pool).await.unwrap();
        let names: Vec<&str> = doctors.iter().map(|d| d.full_name.as_str()).collect();
        assert_eq!(names, vec!["adams Smith", "drjones Smith"]);
    }
}

#[cfg(test)]
mod assessment_tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assessment_returns_row() {
        let pool = memory_pool().await;
        let (doctor_id, patient_id) = seed(&pool).await;

        let stored = database::insert_assessment(
            &pool,
            &new_assessment(patient_id, Some(doctor_id), 1_700_000_000),
        )
        .await
        .expect("Failed to insert assessment");

        assert!(stored.id > 0);
        assert_eq!(stored.patient_id, patient_id);
        assert_eq!(stored.doctor_id, Some(doctor_id));
        assert_eq!(stored.risk_level, "low");
        assert_eq!(stored.risk(), RiskLevel::Low);
        assert_eq!(stored.patient_name, "alice Smith");
        assert_eq!(stored.cardiac_symptoms, "no chest pain");
    }

    #[tokio::test]
    async fn test_history_scoping_and_order() {
        let pool = memory_pool().await;
        let (doctor_id, patient_id) = seed(&pool).await;
        let other = database::insert_user(&pool, &new_user("dave", UserRole::Patient, None), "a$b")
            .await
            .unwrap();

        for ts in [100, 300, 200] {
            database::insert_assessment(&pool, &new_assessment(patient_id, Some(doctor_id), ts))
                .await
                .unwrap();
        }
        database::insert_assessment(&pool, &new_assessment(other.id, None, 400))
            .await
            .unwrap();

        let own = database::assessments_for_patient(&pool, patient_id, None).await.unwrap();
        let times: Vec<i64> = own.iter().map(|a| a.timestamp).collect();
        assert_eq!(times, vec![300, 200, 100]);

        let assigned = database::assessments_for_doctor(&pool, doctor_id, None).await.unwrap();
        assert_eq!(assigned.len(), 3);
        assert!(assigned.iter().all(|a| a.patient_id == patient_id));

        // The unassigned assessment at 400 never shows up for the doctor
        let recent = database::recent_assessments(&pool, doctor_id, 2).await.unwrap();
        let times: Vec<i64> = recent.iter().map(|a| a.timestamp).collect();
        assert_eq!(times, vec![300, 200]);
    }

    #[tokio::test]
    async fn test_risk_filter() {
        let pool = memory_pool().await;
        let (doctor_id, patient_id) = seed(&pool).await;

        for (ts, risk) in [(100, RiskLevel::High), (200, RiskLevel::Low), (300, RiskLevel::High)] {
            let mut assessment = new_assessment(patient_id, Some(doctor_id), ts);
            assessment.risk_level = risk;
            database::insert_assessment(&pool, &assessment).await.unwrap();
        }

        let high = database::assessments_for_doctor(&pool, doctor_id, Some(RiskLevel::High))
            .await
            .unwrap();
        let times: Vec<i64> = high.iter().map(|a| a.timestamp).collect();
        assert_eq!(times, vec![300, 100]);

        let low = database::assessments_for_patient(&pool, patient_id, Some(RiskLevel::Low))
            .await
            .unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].risk(), RiskLevel::Low);

        let medium = database::assessments_for_doctor(&pool, doctor_id, Some(RiskLevel::Medium))
            .await
            .unwrap();
        assert!(medium.is_empty());

        let all = database::assessments_for_doctor(&pool, doctor_id, None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_assessment_stats() {
        let pool = memory_pool().await;
        let (doctor_id, alice) = seed(&pool).await;
        let bob = database::insert_user(
            &pool,
            &new_user("bob", UserRole::Patient, Some(doctor_id)),
            "a$b",
        )
        .await
        .unwrap();
        let carol = database::insert_user(
            &pool,
            &new_user("carol", UserRole::Patient, Some(doctor_id)),
            "a$b",
        )
        .await
        .unwrap();
        let unassigned = database::insert_user(&pool, &new_user("dave", UserRole::Patient, None), "a$b")
            .await
            .unwrap();

        let rows = [
            (alice, 100, RiskLevel::High),
            (alice, 1_000, RiskLevel::High),
            (alice, 2_000, RiskLevel::Low),
            (bob.id, 1_500, RiskLevel::Medium),
            (carol.id, 500, RiskLevel::High),
        ];
        for (patient_id, ts, risk) in rows {
            let mut assessment = new_assessment(patient_id, Some(doctor_id), ts);
            assessment.risk_level = risk;
            database::insert_assessment(&pool, &assessment).await.unwrap();
        }
        let mut elsewhere = new_assessment(unassigned.id, None, 3_000);
        elsewhere.risk_level = RiskLevel::High;
        database::insert_assessment(&pool, &elsewhere).await.unwrap();

        let stats = database::assessment_stats(&pool, doctor_id, 1_000).await.unwrap();
        assert_eq!(stats.total_patients, 3);
        assert_eq!(stats.total_assessments, 5);
        assert_eq!(stats.high_risk_patients, 2);
        assert_eq!(stats.todays_assessments, 3);
    }

    #[tokio::test]
    async fn test_stats_for_doctor_without_patients() {
        let pool = memory_pool().await;
        let (doctor_id, _) = seed(&pool).await;

        let stats = database::assessment_stats(&pool, doctor_id, 0).await.unwrap();
        assert_eq!(stats, AssessmentStats::default());
    }

    #[tokio::test]
    async fn test_unknown_patient_rejected() {
        let pool = memory_pool().await;
        let result = database::insert_assessment(&pool, &new_assessment(9999, None, 1)).await;
        assert!(result.is_err(), "foreign key should reject unknown patient");
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;

    #[tokio::test]
    async fn test_init_db_creates_file_and_persists() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = AppConfig {
            database_path: dir.path().join("care.sqlite"),
            max_connections: 2,
            ..AppConfig::default()
        };

        let pool = database::init_db(&config).await.expect("Failed to init db");
        assert!(config.database_path.exists());
        database::insert_user(&pool, &new_user("erin", UserRole::Doctor, None), "a$b")
            .await
            .unwrap();
        pool.close().await;

        // Re-running the schema on an existing file keeps the data
        let pool = database::init_db(&config).await.expect("Failed to reopen db");
        let doctors = database::list_doctors(&pool).await.unwrap();
        assert_eq!(doctors.len(), 1);
        pool.close().await;
    }
}
