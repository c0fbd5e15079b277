//! Test Module
//!
//! Suites that span several modules. Unit tests live next to the code.
//!
//! ## Test Categories
//! - `analysis_tests`: end-to-end classification scenarios and property tests
//! - `database_tests`: schema, CRUD and history scoping on SQLite
//! - `integration_tests`: registration, login and submission workflows

pub mod database_tests;

use sqlx::SqlitePool;

/// In-memory database with the schema applied.
///
/// A single connection keeps every query on the same in-memory database.
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = crate::database::open("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    crate::database::migrate(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
