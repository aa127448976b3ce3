use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::academic_years::models::{AcademicYearRecord, AcademicYearStatus};
use crate::shared::constants::{MAX_ACADEMIC_YEAR, MIN_ACADEMIC_YEAR};

/// Request DTO for creating an academic year
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAcademicYearDto {
    /// e.g. "2024-2025"
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,

    #[validate(range(min = MIN_ACADEMIC_YEAR, max = MAX_ACADEMIC_YEAR, message = "start_year must be between 2000 and 2100"))]
    pub start_year: i32,

    #[validate(range(min = MIN_ACADEMIC_YEAR, max = MAX_ACADEMIC_YEAR, message = "end_year must be between 2000 and 2100"))]
    pub end_year: i32,

    #[serde(default)]
    pub is_current: bool,

    #[serde(default)]
    pub status: AcademicYearStatus,
}

impl CreateAcademicYearDto {
    pub fn check_year_order(&self) -> Result<()> {
        check_year_order(self.start_year, self.end_year)
    }
}

/// Request DTO for updating an academic year; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAcademicYearDto {
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(range(min = MIN_ACADEMIC_YEAR, max = MAX_ACADEMIC_YEAR, message = "start_year must be between 2000 and 2100"))]
    pub start_year: Option<i32>,

    #[validate(range(min = MIN_ACADEMIC_YEAR, max = MAX_ACADEMIC_YEAR, message = "end_year must be between 2000 and 2100"))]
    pub end_year: Option<i32>,

    /// `true` makes this the current year; `false` clears the flag
    pub is_current: Option<bool>,

    pub status: Option<AcademicYearStatus>,
}

impl UpdateAcademicYearDto {
    /// Order check when both bounds are supplied; mixed updates are checked
    /// against the stored row by the table constraint.
    pub fn check_year_order(&self) -> Result<()> {
        match (self.start_year, self.end_year) {
            (Some(start), Some(end)) => check_year_order(start, end),
            _ => Ok(()),
        }
    }
}

fn check_year_order(start_year: i32, end_year: i32) -> Result<()> {
    if end_year < start_year {
        return Err(AppError::field(
            "end_year",
            "end_year must be greater than or equal to start_year",
        ));
    }
    Ok(())
}

/// Response DTO for academic year
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AcademicYearResponseDto {
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

impl From<AcademicYearRecord> for AcademicYearResponseDto {
    fn from(y: AcademicYearRecord) -> Self {
        Self {
            id: y.id,
            name: y.name,
            start_year: y.start_year,
            end_year: y.end_year,
            is_current: y.is_current,
            status: y.status,
            archived: y.archived,
            students_count: y.students_count,
            created_at: y.created_at,
            updated_at: y.updated_at,
        }
    }
}
