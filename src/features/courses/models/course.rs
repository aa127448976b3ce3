use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Course row joined with its department name and live enrollment count
#[derive(Debug, Clone, FromRow)]
pub struct CourseRecord {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
    pub credits: i16,
    pub description: Option<String>,
    pub archived: bool,
    pub students_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
