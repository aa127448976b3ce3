use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::faculty::models::FacultyRecord;
use crate::shared::aggregation::{average_non_null, group_counts, label_or_unknown, GroupCount};

/// Faculty statistics over a filtered set. `Default` is the all-zero shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacultyStatsDto {
    pub total: i64,
    pub by_department: Vec<GroupCount>,
    pub by_employment_type: Vec<GroupCount>,
    pub by_position: Vec<GroupCount>,
    /// Mean over faculty with a recorded salary, 2 decimal places
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_salary: Decimal,
}

impl FacultyStatsDto {
    pub fn from_records(records: &[FacultyRecord]) -> Self {
        Self {
            total: records.len() as i64,
            by_department: group_counts(records, |f| label_or_unknown(f.department_name.as_deref())),
            by_employment_type: group_counts(records, |f| f.employment_type.to_string()),
            by_position: group_counts(records, |f| label_or_unknown(f.position.as_deref())),
            average_salary: average_non_null(records.iter().map(|f| f.salary)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::faculty::dtos::faculty_dto::tests::bare_record;
    use crate::features::faculty::models::EmploymentType;
    use crate::shared::aggregation::tests::sorted;

    #[test]
    fn test_stats_with_missing_salary_and_department() {
        let records = vec![
            FacultyRecord {
                salary: Some(Decimal::from(50_000)),
                department_name: Some("CS".to_string()),
                position: Some("Instructor".to_string()),
                ..bare_record()
            },
            FacultyRecord {
                employment_type: EmploymentType::PartTime,
                ..bare_record()
            },
            FacultyRecord {
                salary: Some(Decimal::from(70_000)),
                department_name: Some("CS".to_string()),
                position: Some("Professor".to_string()),
                ..bare_record()
            },
        ];

        let stats = FacultyStatsDto::from_records(&records);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_salary, Decimal::new(6_000_000, 2));
        assert_eq!(
            sorted(stats.by_department),
            vec![("CS".to_string(), 2), ("Unknown".to_string(), 1)]
        );
        assert_eq!(
            sorted(stats.by_employment_type),
            vec![("full_time".to_string(), 2), ("part_time".to_string(), 1)]
        );
        assert_eq!(sorted(stats.by_position).len(), 3);
    }

    #[test]
    fn test_zero_shape_serializes_average_as_number() {
        let stats = FacultyStatsDto::from_records(&[]);
        assert_eq!(stats, FacultyStatsDto::default());

        let body = serde_json::to_value(&stats).unwrap();
        assert_eq!(body["total"], 0);
        assert_eq!(body["average_salary"], serde_json::json!(0.0));
        assert_eq!(body["by_position"], serde_json::json!([]));
    }
}
