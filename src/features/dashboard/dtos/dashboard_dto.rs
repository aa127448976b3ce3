use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::shared::aggregation::GroupCount;

// ============================================================================
// Summary (headline numbers for the landing page)
// ============================================================================

/// Headline counts over live records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct DashboardCounts {
    pub total_students: i64,
    pub total_faculty: i64,
    pub total_courses: i64,
    pub total_departments: i64,
    pub archived_students: i64,
    pub archived_faculty: i64,
    /// Name of the current academic year, if one is set
    pub current_academic_year: Option<String>,
}

/// Dashboard bundle. `Default` is the all-zero shape returned on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    #[serde(flatten)]
    pub counts: DashboardCounts,
    pub students_by_category: Vec<GroupCount>,
    pub faculty_by_employment_type: Vec<GroupCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_shape() {
        let body = serde_json::to_value(DashboardSummaryDto::default()).unwrap();
        assert_eq!(body["total_students"], 0);
        assert_eq!(body["archived_faculty"], 0);
        assert!(body["current_academic_year"].is_null());
        assert_eq!(body["students_by_category"], serde_json::json!([]));
    }
}
