use std::sync::Arc;

use crate::core::error::Result;
use crate::features::faculty::dtos::{FacultyFilterParams, FacultyStatsDto};
use crate::features::faculty::FacultyService;
use crate::features::reports::dtos::{FacultyReportDto, StudentReportDto};
use crate::features::students::dtos::{StudentFilterParams, StudentStatsDto};
use crate::features::students::StudentService;
use crate::shared::types::{PaginationMeta, PaginationQuery};

/// Builds reports on top of the student and faculty services
pub struct ReportService {
    students: Arc<StudentService>,
    faculty: Arc<FacultyService>,
}

impl ReportService {
    pub fn new(students: Arc<StudentService>, faculty: Arc<FacultyService>) -> Self {
        Self { students, faculty }
    }

    /// Record page plus statistics. A statistics failure leaves the records
    /// intact and reports all-zero statistics.
    pub async fn students(
        &self,
        filter: &StudentFilterParams,
        pagination: &PaginationQuery,
    ) -> Result<(StudentReportDto, PaginationMeta)> {
        let (records, meta) = self.students.list(filter, pagination).await?;

        let statistics = self.students.stats(filter).await.unwrap_or_else(|e| {
            tracing::error!("Student report statistics failed: {}", e);
            StudentStatsDto::default()
        });

        Ok((StudentReportDto { records, statistics }, meta))
    }

    pub async fn faculty(
        &self,
        filter: &FacultyFilterParams,
        pagination: &PaginationQuery,
    ) -> Result<(FacultyReportDto, PaginationMeta)> {
        let (records, meta) = self.faculty.list(filter, pagination).await?;

        let statistics = self.faculty.stats(filter).await.unwrap_or_else(|e| {
            tracing::error!("Faculty report statistics failed: {}", e);
            FacultyStatsDto::default()
        });

        Ok((FacultyReportDto { records, statistics }, meta))
    }
}
