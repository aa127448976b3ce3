use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::features::faculty::models::EmploymentType;
use crate::shared::filters::{Conditions, FilterSpec};
use crate::shared::types::empty_as_none;

/// Filters shared by the faculty list, statistics, report and export
/// endpoints. Empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacultyFilterParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub employment_type: Option<EmploymentType>,

    /// Matches name, email or employee number (case-insensitive)
    #[serde(default)]
    pub search: Option<String>,

    /// `true` shows the archive instead of live records
    #[serde(default, deserialize_with = "empty_as_none")]
    pub archived: Option<bool>,
}

impl FilterSpec for FacultyFilterParams {
    fn apply(&self, conditions: &mut Conditions<'_, '_>) {
        conditions
            .archived("f.archived", self.archived.unwrap_or(false))
            .eq("f.department_id", self.department_id)
            .eq("f.employment_type", self.employment_type)
            .search(&["u.name", "u.email", "f.employee_id"], self.search.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filters::filtered_query;

    #[test]
    fn test_filters_compose() {
        let filter = FacultyFilterParams {
            department_id: None,
            employment_type: Some(EmploymentType::PartTime),
            search: Some("reyes".to_string()),
            archived: None,
        };
        let qb = filtered_query("SELECT COUNT(*) FROM faculty f", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM faculty f WHERE f.archived = FALSE AND f.employment_type = $1 \
             AND (u.name ILIKE $2 OR u.email ILIKE $3 OR f.employee_id ILIKE $4)"
        );
    }
}
