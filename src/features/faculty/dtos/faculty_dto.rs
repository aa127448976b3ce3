use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::faculty::models::{EmploymentType, FacultyRecord};
use crate::shared::aggregation::label_or_unknown;
use crate::shared::constants::MIN_PASSWORD_LENGTH;
use crate::shared::validation::BUSINESS_KEY_REGEX;

fn non_negative_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if salary.is_sign_negative() && !salary.is_zero() {
        let mut error = ValidationError::new("salary_range");
        error.message = Some("salary must not be negative".into());
        return Err(error);
    }
    Ok(())
}

/// Request DTO for hiring a faculty member; creates the paired account too
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacultyDto {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "password must be at least 8 characters"))]
    pub password: String,

    /// Employee number, e.g. "EMP-0042"
    #[validate(
        length(min = 1, max = 50, message = "employee_id is required"),
        regex(path = *BUSINESS_KEY_REGEX, message = "employee_id may only contain letters, digits and hyphens")
    )]
    pub employee_id: String,

    pub department_id: Option<Uuid>,

    #[validate(length(max = 255, message = "position must be at most 255 characters"))]
    pub position: Option<String>,

    #[serde(default)]
    pub employment_type: EmploymentType,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "non_negative_salary"))]
    pub salary: Option<Decimal>,

    pub hire_date: Option<NaiveDate>,

    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,

    pub address: Option<String>,

    #[validate(length(max = 255, message = "specialization must be at most 255 characters"))]
    pub specialization: Option<String>,
}

/// Request DTO for updating a faculty member; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFacultyDto {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "password must be at least 8 characters"))]
    pub password: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "employee_id must not be empty"),
        regex(path = *BUSINESS_KEY_REGEX, message = "employee_id may only contain letters, digits and hyphens")
    )]
    pub employee_id: Option<String>,

    pub department_id: Option<Uuid>,

    #[validate(length(max = 255, message = "position must be at most 255 characters"))]
    pub position: Option<String>,

    pub employment_type: Option<EmploymentType>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "non_negative_salary"))]
    pub salary: Option<Decimal>,

    pub hire_date: Option<NaiveDate>,

    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,

    pub address: Option<String>,

    #[validate(length(max = 255, message = "specialization must be at most 255 characters"))]
    pub specialization: Option<String>,
}

/// Response DTO for faculty
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub department_id: Option<Uuid>,
    pub department_name: String,
    pub position: Option<String>,
    pub employment_type: EmploymentType,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub salary: Option<Decimal>,
    pub hire_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub specialization: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FacultyRecord> for FacultyResponseDto {
    fn from(f: FacultyRecord) -> Self {
        Self {
            department_name: label_or_unknown(f.department_name.as_deref()),
            id: f.id,
            user_id: f.user_id,
            name: f.user_name,
            email: f.user_email,
            employee_id: f.employee_id,
            department_id: f.department_id,
            position: f.position,
            employment_type: f.employment_type,
            salary: f.salary,
            hire_date: f.hire_date,
            phone: f.phone,
            address: f.address,
            specialization: f.specialization,
            archived: f.archived,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    /// Faculty read model with no department and no salary
    pub(crate) fn bare_record() -> FacultyRecord {
        let now = Utc::now();
        FacultyRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: Name().fake(),
            user_email: SafeEmail().fake(),
            employee_id: "EMP-0001".to_string(),
            department_id: None,
            department_name: None,
            position: None,
            employment_type: EmploymentType::FullTime,
            salary: None,
            hire_date: None,
            phone: None,
            address: None,
            specialization: None,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_salary_is_a_json_number() {
        let record = FacultyRecord {
            salary: Some(Decimal::new(5_250_050, 2)),
            ..bare_record()
        };
        let body = serde_json::to_value(FacultyResponseDto::from(record)).unwrap();
        assert_eq!(body["salary"], serde_json::json!(52500.5));
        assert_eq!(body["department_name"], "Unknown");
        assert_eq!(body["employment_type"], "full_time");
    }

    #[test]
    fn test_salary_accepts_numbers_and_rejects_negatives() {
        let dto: CreateFacultyDto = serde_json::from_value(serde_json::json!({
            "name": "Dr. Reyes",
            "email": "reyes@example.edu",
            "password": "password123",
            "employee_id": "EMP-0042",
            "salary": -1.5
        }))
        .unwrap();
        assert_eq!(dto.employment_type, EmploymentType::FullTime);
        assert!(dto.validate().unwrap_err().field_errors().contains_key("salary"));

        let dto: UpdateFacultyDto =
            serde_json::from_value(serde_json::json!({ "salary": 45000 })).unwrap();
        assert_eq!(dto.salary, Some(Decimal::from(45_000)));
        assert!(dto.validate().is_ok());

        let dto: UpdateFacultyDto = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(dto.salary.is_none());
    }
}
