//! Patient and doctor accounts: registration, login and the doctor directory.

use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

use crate::database;
use crate::error::AppError;
use crate::models::{DoctorSummary, NewUser, User, UserRole};

const SALT_LEN: usize = 16;
const LOGIN_FAILED: &str = "Invalid username or password";

/// Hash a password with a fresh random salt, as `salt_hex$digest_hex`
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}", hex::encode(salt), hex::encode(digest(&salt, password)))
}

/// Check a password against a stored `salt_hex$digest_hex` value
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AppError> {
    let (salt_hex, expected) = stored
        .split_once('$')
        .ok_or_else(|| AppError::Internal("Stored password hash is malformed".to_string()))?;
    let salt = hex::decode(salt_hex)
        .map_err(|e| AppError::Internal(format!("Stored password salt is not hex: {}", e)))?;

    let expected = hex::decode(expected)
        .map_err(|e| AppError::Internal(format!("Stored password digest is not hex: {}", e)))?;

    Ok(constant_time_eq(&digest(&salt, password), &expected))
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// Byte equality whose running time does not depend on where the inputs differ
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub async fn register(pool: &SqlitePool, new_user: NewUser) -> Result<User, AppError> {
    new_user.validate()?;

    match (new_user.role, new_user.doctor_id) {
        (UserRole::Doctor, Some(_)) => {
            return Err(AppError::Validation(
                "Doctor accounts cannot be assigned to a doctor".to_string(),
            ));
        }
        (UserRole::Patient, Some(doctor_id)) => {
            let doctor = database::get_user(pool, doctor_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Doctor {} does not exist", doctor_id)))?;
            if !doctor.is_doctor() {
                return Err(AppError::Validation(format!(
                    "User {} is not a doctor",
                    doctor_id
                )));
            }
        }
        _ => {}
    }

    if database::user_exists(pool, &new_user.username, &new_user.email).await? {
        return Err(AppError::Validation(
            "Username or email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&new_user.password);
    let user = database::insert_user(pool, &new_user, &password_hash)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Validation("Username or email already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

    info!(user_id = user.id, role = %user.user_type, "Registered account {}", user.username);
    Ok(user)
}

pub async fn login(pool: &SqlitePool, username: &str, password: &str) -> Result<User, AppError> {
    let Some(user) = database::find_user_by_username(pool, username).await? else {
        warn!("Login failed for unknown user");
        return Err(AppError::Authentication(LOGIN_FAILED.to_string()));
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(AppError::Authentication(LOGIN_FAILED.to_string()));
    }

    info!(user_id = user.id, "Logged in as {}", user.username);
    Ok(user)
}

pub async fn doctors(pool: &SqlitePool) -> Result<Vec<DoctorSummary>, AppError> {
    Ok(database::list_doctors(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_roundtrip() {
        let stored = hash_password("s3cret-pass");
        assert!(verify_password("s3cret-pass", &stored).unwrap());
        assert!(!verify_password("wrong-pass", &stored).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same password");
        let b = hash_password("same password");
        assert_ne!(a, b);

        let (salt, digest) = a.split_once('$').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(
            verify_password("pw", "no-separator"),
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            verify_password("pw", "zz$abcd"),
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            verify_password("pw", "abcd$not-hex"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_digest_compared_as_bytes() {
        let stored = hash_password("s3cret-pass");
        let (salt, digest) = stored.split_once('$').unwrap();

        // Hex case does not matter once decoded
        let upper = format!("{}${}", salt, digest.to_uppercase());
        assert!(verify_password("s3cret-pass", &upper).unwrap());

        let truncated = format!("{}${}", salt, &digest[..62]);
        assert!(!verify_password("s3cret-pass", &truncated).unwrap());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }
}
