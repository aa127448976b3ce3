use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use super::StudentDocuments;

/// Admission category, matching the `student_category` database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "student_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StudentCategory {
    #[default]
    Freshman,
    Transferee,
    Returnee,
    Regular,
    Irregular,
}

impl StudentCategory {
    pub const ALL: [StudentCategory; 5] = [
        StudentCategory::Freshman,
        StudentCategory::Transferee,
        StudentCategory::Returnee,
        StudentCategory::Regular,
        StudentCategory::Irregular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentCategory::Freshman => "freshman",
            StudentCategory::Transferee => "transferee",
            StudentCategory::Returnee => "returnee",
            StudentCategory::Regular => "regular",
            StudentCategory::Irregular => "irregular",
        }
    }

    /// Document fields a student of this category may submit, besides the
    /// ones every student submits
    pub fn specific_documents(&self) -> &'static [&'static str] {
        match self {
            StudentCategory::Freshman => &[
                "birth_certificate",
                "report_card",
                "permanent_record",
                "good_moral_certificate",
                "certificate_of_completion",
            ],
            StudentCategory::Transferee => &[
                "birth_certificate",
                "good_moral_certificate",
                "honorable_dismissal",
                "transcript_of_records",
                "subject_descriptions",
                "previous_school_id",
            ],
            StudentCategory::Returnee => &["clearance", "readmission_slip", "grade_slip"],
            StudentCategory::Regular => &["clearance", "grade_slip"],
            StudentCategory::Irregular => &["clearance", "grade_slip", "subject_descriptions"],
        }
    }
}

impl fmt::Display for StudentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudentCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown student category: {}", s))
    }
}

/// Student row joined with its account and related display names.
///
/// Relation names are `None` when the relation is unset (or dangling); the
/// projection layer turns them into `"Unknown"`.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub student_id: String,
    pub course_id: Option<Uuid>,
    pub course_name: Option<String>,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
    pub academic_year_id: Option<Uuid>,
    pub academic_year_name: Option<String>,
    pub category: StudentCategory,
    pub enrollment_date: Option<NaiveDate>,
    pub year_level: Option<i16>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    #[sqlx(flatten)]
    pub documents: StudentDocuments,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_case_insensitively() {
        assert_eq!("Transferee".parse::<StudentCategory>(), Ok(StudentCategory::Transferee));
        assert_eq!("regular".parse::<StudentCategory>(), Ok(StudentCategory::Regular));
        assert!("alumni".parse::<StudentCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(StudentCategory::Irregular).unwrap(),
            serde_json::json!("irregular")
        );
    }
}
