use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "academic_year_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AcademicYearStatus {
    #[default]
    Upcoming,
    Active,
    Completed,
}

#[derive(Debug, Clone, FromRow)]
pub struct AcademicYearRecord {
    pub id: Uuid,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub is_current: bool,
    pub status: AcademicYearStatus,
    pub archived: bool,
    pub students_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
