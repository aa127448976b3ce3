use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::features::students::models::StudentCategory;
use crate::shared::filters::{Conditions, FilterSpec};
use crate::shared::types::empty_as_none;

/// Filters shared by the student list, statistics, report and export
/// endpoints. Empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub course_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub academic_year_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<StudentCategory>,

    /// Matches name, email or student number (case-insensitive)
    #[serde(default)]
    pub search: Option<String>,

    /// `true` shows the archive instead of live records
    #[serde(default, deserialize_with = "empty_as_none")]
    pub archived: Option<bool>,
}

impl FilterSpec for StudentFilterParams {
    fn apply(&self, conditions: &mut Conditions<'_, '_>) {
        conditions
            .archived("s.archived", self.archived.unwrap_or(false))
            .eq("s.department_id", self.department_id)
            .eq("s.course_id", self.course_id)
            .eq("s.academic_year_id", self.academic_year_id)
            .eq("s.category", self.category)
            .search(&["u.name", "u.email", "s.student_id"], self.search.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filters::filtered_query;

    #[test]
    fn test_all_filters_compose() {
        let filter = StudentFilterParams {
            department_id: Some(Uuid::nil()),
            course_id: None,
            academic_year_id: Some(Uuid::nil()),
            category: Some(StudentCategory::Regular),
            search: Some("santos".to_string()),
            archived: None,
        };
        let qb = filtered_query("SELECT COUNT(*) FROM students s", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM students s WHERE s.archived = FALSE AND s.department_id = $1 \
             AND s.academic_year_id = $2 AND s.category = $3 \
             AND (u.name ILIKE $4 OR u.email ILIKE $5 OR s.student_id ILIKE $6)"
        );
    }

    #[test]
    fn test_archive_view() {
        let filter = StudentFilterParams {
            archived: Some(true),
            ..Default::default()
        };
        let qb = filtered_query("SELECT 1 FROM students s", &filter);
        assert_eq!(qb.sql(), "SELECT 1 FROM students s WHERE s.archived = TRUE");
    }

    #[test]
    fn test_query_string_values() {
        let filter: StudentFilterParams = serde_json::from_value(serde_json::json!({
            "department_id": "",
            "category": "transferee",
            "archived": "true"
        }))
        .unwrap();
        assert!(filter.department_id.is_none());
        assert_eq!(filter.category, Some(StudentCategory::Transferee));
        assert_eq!(filter.archived, Some(true));
    }
}
