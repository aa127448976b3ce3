//! Account writes, always executed on the caller's transaction.

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{NewUser, User};

/// Hash a plaintext password with Argon2id (PHC string format)
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing error: {}", e)))
}

/// Insert the user row for a new student or faculty record
pub async fn create_account(conn: &mut PgConnection, new_user: NewUser<'_>) -> Result<User> {
    let password_hash = hash_password(new_user.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, password_hash, role, created_at, updated_at
        "#,
    )
    .bind(new_user.name.trim())
    .bind(new_user.email.trim().to_lowercase())
    .bind(password_hash)
    .bind(new_user.role)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_write_error)?;

    tracing::info!("User created: id={}, role={}", user.id, user.role);

    Ok(user)
}

/// Optional account fields carried by an update request
#[derive(Debug, Default)]
pub struct AccountChanges<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl AccountChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Apply account changes; absent fields keep their stored values
pub async fn update_account(
    conn: &mut PgConnection,
    user_id: Uuid,
    changes: AccountChanges<'_>,
) -> Result<()> {
    if changes.is_empty() {
        return Ok(());
    }

    let password_hash = changes.password.map(hash_password).transpose()?;

    sqlx::query(
        r#"
        UPDATE users
        SET name = COALESCE($1, name),
            email = COALESCE($2, email),
            password_hash = COALESCE($3, password_hash),
            updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(changes.name.map(str::trim))
    .bind(changes.email.map(|e| e.trim().to_lowercase()))
    .bind(password_hash)
    .bind(user_id)
    .execute(&mut *conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_password_is_verifiable_argon2id() {
        let hash = hash_password("s3cret-passw0rd").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"s3cret-passw0rd", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong", &parsed)
            .is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(
            hash_password("same-password").unwrap(),
            hash_password("same-password").unwrap()
        );
    }

    #[test]
    fn test_account_changes_is_empty() {
        assert!(AccountChanges::default().is_empty());
        assert!(!AccountChanges {
            name: Some("Ana"),
            ..Default::default()
        }
        .is_empty());
    }
}
