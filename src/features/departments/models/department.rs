use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Department row with live member counts
#[derive(Debug, Clone, FromRow)]
pub struct DepartmentRecord {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub archived: bool,
    pub courses_count: i64,
    pub students_count: i64,
    pub faculty_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
