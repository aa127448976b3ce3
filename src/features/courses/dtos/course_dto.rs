use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::courses::models::CourseRecord;
use crate::shared::aggregation::label_or_unknown;
use crate::shared::constants::{MAX_COURSE_CREDITS, MIN_COURSE_CREDITS};
use crate::shared::types::empty_as_none;
use crate::shared::validation::CODE_REGEX;

/// Query params for listing courses
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    /// `true` shows the archive instead of live records
    #[serde(default, deserialize_with = "empty_as_none")]
    pub archived: Option<bool>,

    /// Case-insensitive match on name or code
    #[serde(default)]
    pub search: Option<String>,

    /// Only courses of this department
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<Uuid>,
}

/// Request DTO for creating a course
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 50, message = "code is required"),
        regex(path = *CODE_REGEX, message = "code may only contain letters, digits and single hyphens")
    )]
    pub code: String,

    pub department_id: Option<Uuid>,

    #[validate(range(min = MIN_COURSE_CREDITS, max = MAX_COURSE_CREDITS, message = "credits must be between 1 and 6"))]
    pub credits: i16,

    pub description: Option<String>,
}

/// Request DTO for updating a course; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "code must not be empty"),
        regex(path = *CODE_REGEX, message = "code may only contain letters, digits and single hyphens")
    )]
    pub code: Option<String>,

    pub department_id: Option<Uuid>,

    #[validate(range(min = MIN_COURSE_CREDITS, max = MAX_COURSE_CREDITS, message = "credits must be between 1 and 6"))]
    pub credits: Option<i16>,

    pub description: Option<String>,
}

/// Response DTO for course
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponseDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub department_id: Option<Uuid>,
    pub department_name: String,
    pub credits: i16,
    pub description: Option<String>,
    pub archived: bool,
    pub students_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseRecord> for CourseResponseDto {
    fn from(c: CourseRecord) -> Self {
        Self {
            department_name: label_or_unknown(c.department_name.as_deref()),
            id: c.id,
            name: c.name,
            code: c.code,
            department_id: c.department_id,
            credits: c.credits,
            description: c.description,
            archived: c.archived,
            students_count: c.students_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(credits: i16) -> CreateCourseDto {
        CreateCourseDto {
            name: "BS Computer Science".to_string(),
            code: "BSCS".to_string(),
            department_id: None,
            credits,
            description: None,
        }
    }

    #[test]
    fn test_credits_bounds() {
        assert!(create_dto(1).validate().is_ok());
        assert!(create_dto(6).validate().is_ok());
        assert!(create_dto(0).validate().is_err());
        assert!(create_dto(7).validate().is_err());
    }

    #[test]
    fn test_update_credits_checked_only_when_present() {
        let dto = UpdateCourseDto {
            name: None,
            code: None,
            department_id: None,
            credits: None,
            description: Some("Updated".to_string()),
        };
        assert!(dto.validate().is_ok());

        let dto = UpdateCourseDto {
            credits: Some(12),
            ..dto
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("credits"));
    }

    #[test]
    fn test_missing_department_projects_to_unknown() {
        let now = Utc::now();
        let dto = CourseResponseDto::from(CourseRecord {
            id: Uuid::new_v4(),
            name: "BS Nursing".to_string(),
            code: "BSN".to_string(),
            department_id: None,
            department_name: None,
            credits: 3,
            description: None,
            archived: false,
            students_count: 0,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(dto.department_name, "Unknown");
    }
}
