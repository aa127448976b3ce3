use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{DashboardCounts, DashboardSummaryDto};
use crate::shared::aggregation::GroupCount;

pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Summary
    // ========================================================================

    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM students WHERE archived = FALSE) AS total_students,
                (SELECT COUNT(*) FROM faculty WHERE archived = FALSE) AS total_faculty,
                (SELECT COUNT(*) FROM courses WHERE archived = FALSE) AS total_courses,
                (SELECT COUNT(*) FROM departments WHERE archived = FALSE) AS total_departments,
                (SELECT COUNT(*) FROM students WHERE archived = TRUE) AS archived_students,
                (SELECT COUNT(*) FROM faculty WHERE archived = TRUE) AS archived_faculty,
                (SELECT name FROM academic_years
                 WHERE is_current = TRUE AND archived = FALSE LIMIT 1) AS current_academic_year
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get summary counts: {:?}", e);
            AppError::Database(e)
        })?;

        let students_by_category = self
            .grouped(
                "SELECT category::TEXT, COUNT(*) FROM students WHERE archived = FALSE \
                 GROUP BY category ORDER BY category",
            )
            .await?;

        let faculty_by_employment_type = self
            .grouped(
                "SELECT employment_type::TEXT, COUNT(*) FROM faculty WHERE archived = FALSE \
                 GROUP BY employment_type ORDER BY employment_type",
            )
            .await?;

        Ok(DashboardSummaryDto {
            counts,
            students_by_category,
            faculty_by_employment_type,
        })
    }

    /// Run a `(label, count)` grouping query
    async fn grouped(&self, sql: &'static str) -> Result<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, (String, i64)>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get grouped counts: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(label, count)| GroupCount { label, count })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::academic_years::dtos::CreateAcademicYearDto;
    use crate::features::academic_years::models::AcademicYearStatus;
    use crate::features::academic_years::AcademicYearService;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_summary_of_empty_database(pool: PgPool) {
        let summary = DashboardService::new(pool).get_summary().await.unwrap();
        assert_eq!(summary, DashboardSummaryDto::default());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_summary_names_current_year(pool: PgPool) {
        AcademicYearService::new(pool.clone())
            .create(CreateAcademicYearDto {
                name: "2025-2026".to_string(),
                start_year: 2025,
                end_year: 2026,
                is_current: true,
                status: AcademicYearStatus::Active,
            })
            .await
            .unwrap();

        let summary = DashboardService::new(pool).get_summary().await.unwrap();
        assert_eq!(summary.counts.current_academic_year.as_deref(), Some("2025-2026"));
    }
}
