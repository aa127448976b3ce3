use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::students::models::StudentRecord;
use crate::shared::aggregation::{group_counts, label_or_unknown, GroupCount};

/// Student statistics over a filtered set. `Default` is the all-zero shape
/// returned when the statistics cannot be computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentStatsDto {
    pub total: i64,
    pub by_department: Vec<GroupCount>,
    pub by_course: Vec<GroupCount>,
    pub by_academic_year: Vec<GroupCount>,
    pub by_category: Vec<GroupCount>,
}

impl StudentStatsDto {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        Self {
            total: records.len() as i64,
            by_department: group_counts(records, |s| label_or_unknown(s.department_name.as_deref())),
            by_course: group_counts(records, |s| label_or_unknown(s.course_name.as_deref())),
            by_academic_year: group_counts(records, |s| {
                label_or_unknown(s.academic_year_name.as_deref())
            }),
            by_category: group_counts(records, |s| s.category.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::students::dtos::student_dto::tests::bare_record;
    use crate::features::students::models::StudentCategory;
    use crate::shared::aggregation::tests::sorted;
    use crate::shared::aggregation::total_of;

    fn student(category: StudentCategory, department: Option<&str>) -> StudentRecord {
        StudentRecord {
            category,
            department_name: department.map(str::to_string),
            ..bare_record()
        }
    }

    #[test]
    fn test_stats_of_mixed_records() {
        let records = vec![
            student(StudentCategory::Freshman, Some("CS")),
            student(StudentCategory::Regular, Some("CS")),
            student(StudentCategory::Freshman, None),
        ];

        let stats = StudentStatsDto::from_records(&records);

        assert_eq!(stats.total, 3);
        assert_eq!(
            sorted(stats.by_category.clone()),
            vec![("freshman".to_string(), 2), ("regular".to_string(), 1)]
        );
        assert_eq!(
            sorted(stats.by_department.clone()),
            vec![("CS".to_string(), 2), ("Unknown".to_string(), 1)]
        );
        assert_eq!(stats.by_course, vec![GroupCount { label: "Unknown".to_string(), count: 3 }]);
        for groups in [&stats.by_department, &stats.by_course, &stats.by_academic_year, &stats.by_category] {
            assert_eq!(total_of(groups), stats.total);
        }
    }

    #[test]
    fn test_empty_set_is_the_zero_shape() {
        assert_eq!(StudentStatsDto::from_records(&[]), StudentStatsDto::default());
    }
}
