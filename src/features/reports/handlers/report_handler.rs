use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::faculty::dtos::FacultyFilterParams;
use crate::features::reports::dtos::{FacultyReportDto, StudentReportDto};
use crate::features::reports::services::ReportService;
use crate::features::students::dtos::StudentFilterParams;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Student report: filtered page plus statistics over the full filtered set
#[utoipa::path(
    get,
    path = "/api/reports/students",
    params(StudentFilterParams, PaginationQuery),
    responses(
        (status = 200, description = "Student report", body = ApiResponse<StudentReportDto>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "reports"
)]
pub async fn student_report(
    State(service): State<Arc<ReportService>>,
    AppQuery(filter): AppQuery<StudentFilterParams>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<StudentReportDto>>> {
    let (report, meta) = service.students(&filter, &pagination).await?;
    Ok(Json(ApiResponse::paginated(report, meta)))
}

/// Faculty report: filtered page plus statistics over the full filtered set
#[utoipa::path(
    get,
    path = "/api/reports/faculty",
    params(FacultyFilterParams, PaginationQuery),
    responses(
        (status = 200, description = "Faculty report", body = ApiResponse<FacultyReportDto>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "reports"
)]
pub async fn faculty_report(
    State(service): State<Arc<ReportService>>,
    AppQuery(filter): AppQuery<FacultyFilterParams>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<FacultyReportDto>>> {
    let (report, meta) = service.faculty(&filter, &pagination).await?;
    Ok(Json(ApiResponse::paginated(report, meta)))
}
