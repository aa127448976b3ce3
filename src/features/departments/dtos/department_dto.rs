use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::departments::models::DepartmentRecord;
use crate::shared::validation::CODE_REGEX;

/// Request DTO for creating a department
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 50, message = "code is required"),
        regex(path = *CODE_REGEX, message = "code may only contain letters, digits and single hyphens")
    )]
    pub code: String,

    pub description: Option<String>,
}

/// Request DTO for updating a department; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentDto {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "code must not be empty"),
        regex(path = *CODE_REGEX, message = "code may only contain letters, digits and single hyphens")
    )]
    pub code: Option<String>,

    pub description: Option<String>,
}

/// Response DTO for department
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponseDto {
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

impl From<DepartmentRecord> for DepartmentResponseDto {
    fn from(d: DepartmentRecord) -> Self {
        Self {
            id: d.id,
            name: d.name,
            code: d.code,
            description: d.description,
            archived: d.archived,
            courses_count: d.courses_count,
            students_count: d.students_count,
            faculty_count: d.faculty_count,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
