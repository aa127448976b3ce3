use crate::core::config::DatabaseConfig;
use crate::core::error::AppError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// PostgreSQL SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL SQLSTATE for CHECK constraint violations
const CHECK_VIOLATION: &str = "23514";

/// Named constraints and the request field each one guards
const CONSTRAINT_FIELDS: &[(&str, &str)] = &[
    ("users_email_key", "email"),
    ("students_student_id_key", "student_id"),
    ("faculty_employee_id_key", "employee_id"),
    ("departments_code_key", "code"),
    ("courses_code_key", "code"),
    ("courses_department_id_fkey", "department_id"),
    ("students_course_id_fkey", "course_id"),
    ("students_department_id_fkey", "department_id"),
    ("students_academic_year_id_fkey", "academic_year_id"),
    ("faculty_department_id_fkey", "department_id"),
    ("courses_credits_range", "credits"),
    ("academic_years_year_range", "end_year"),
    ("academic_years_single_current", "is_current"),
];

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

fn constraint_field(constraint: &str) -> Option<&'static str> {
    CONSTRAINT_FIELDS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, field)| *field)
}

/// Map a write failure to a client-facing error.
///
/// Unique, foreign key and check violations on known constraints become 422 field
/// errors; everything else stays a database error.
pub fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        let code = db_err.code();
        let field = db_err.constraint().and_then(constraint_field);

        match (code.as_deref(), field) {
            (Some(UNIQUE_VIOLATION), Some(field)) => {
                return AppError::field(field, format!("The {} has already been taken", field));
            }
            (Some(FOREIGN_KEY_VIOLATION), Some(field)) => {
                return AppError::field(field, format!("The selected {} is invalid", field));
            }
            (Some(CHECK_VIOLATION), Some(field)) => {
                return AppError::field(field, format!("The {} is out of range", field));
            }
            _ => {}
        }
    }

    tracing::error!("Database write failed: {:?}", e);
    AppError::Database(e)
}
