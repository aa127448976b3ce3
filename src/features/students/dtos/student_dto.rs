use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::students::models::{StudentCategory, StudentDocuments, StudentRecord};
use crate::shared::aggregation::label_or_unknown;
use crate::shared::constants::MIN_PASSWORD_LENGTH;
use crate::shared::validation::BUSINESS_KEY_REGEX;

/// Request DTO for enrolling a student; creates the paired account too
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "password must be at least 8 characters"))]
    pub password: String,

    /// Student number, e.g. "2024-00123"
    #[validate(
        length(min = 1, max = 50, message = "student_id is required"),
        regex(path = *BUSINESS_KEY_REGEX, message = "student_id may only contain letters, digits and hyphens")
    )]
    pub student_id: String,

    pub course_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub academic_year_id: Option<Uuid>,

    #[serde(default)]
    pub category: StudentCategory,

    pub enrollment_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 6, message = "year_level must be between 1 and 6"))]
    pub year_level: Option<i16>,

    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,

    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 20, message = "gender must be at most 20 characters"))]
    pub gender: Option<String>,

    #[serde(flatten)]
    pub documents: StudentDocuments,
}

/// Request DTO for updating a student; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "password must be at least 8 characters"))]
    pub password: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "student_id must not be empty"),
        regex(path = *BUSINESS_KEY_REGEX, message = "student_id may only contain letters, digits and hyphens")
    )]
    pub student_id: Option<String>,

    pub course_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub academic_year_id: Option<Uuid>,
    pub category: Option<StudentCategory>,
    pub enrollment_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 6, message = "year_level must be between 1 and 6"))]
    pub year_level: Option<i16>,

    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,

    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 20, message = "gender must be at most 20 characters"))]
    pub gender: Option<String>,

    #[serde(flatten)]
    pub documents: StudentDocuments,
}

/// Response DTO for student, relations flattened to display names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub course_id: Option<Uuid>,
    pub course_name: String,
    pub department_id: Option<Uuid>,
    pub department_name: String,
    pub academic_year_id: Option<Uuid>,
    pub academic_year_name: String,
    pub category: StudentCategory,
    pub enrollment_date: Option<NaiveDate>,
    pub year_level: Option<i16>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    #[serde(flatten)]
    pub documents: StudentDocuments,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRecord> for StudentResponseDto {
    fn from(s: StudentRecord) -> Self {
        Self {
            course_name: label_or_unknown(s.course_name.as_deref()),
            department_name: label_or_unknown(s.department_name.as_deref()),
            academic_year_name: label_or_unknown(s.academic_year_name.as_deref()),
            id: s.id,
            user_id: s.user_id,
            name: s.user_name,
            email: s.user_email,
            student_id: s.student_id,
            course_id: s.course_id,
            department_id: s.department_id,
            academic_year_id: s.academic_year_id,
            category: s.category,
            enrollment_date: s.enrollment_date,
            year_level: s.year_level,
            phone: s.phone,
            address: s.address,
            date_of_birth: s.date_of_birth,
            gender: s.gender,
            documents: s.documents,
            archived: s.archived,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
