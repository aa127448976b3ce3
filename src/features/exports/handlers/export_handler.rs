use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::exports::dtos::{ExportFile, ExportFormat};
use crate::features::exports::services::ExportService;
use crate::features::faculty::dtos::FacultyFilterParams;
use crate::features::students::dtos::StudentFilterParams;

impl IntoResponse for ExportFile {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Export students as PDF or CSV (`excel`)
#[utoipa::path(
    get,
    path = "/api/export/students/{format}",
    params(
        ("format" = String, Path, description = "`pdf` or `excel`"),
        StudentFilterParams
    ),
    responses(
        (status = 200, description = "File attachment (application/pdf or text/csv)"),
        (status = 400, description = "Unsupported format or invalid filters"),
        (status = 502, description = "PDF converter unavailable")
    ),
    tag = "exports"
)]
pub async fn export_students(
    State(service): State<Arc<ExportService>>,
    Path(format): Path<String>,
    AppQuery(filter): AppQuery<StudentFilterParams>,
) -> Result<ExportFile> {
    service.students(format.parse::<ExportFormat>()?, &filter).await
}

/// Export faculty as PDF or CSV (`excel`)
#[utoipa::path(
    get,
    path = "/api/export/faculty/{format}",
    params(
        ("format" = String, Path, description = "`pdf` or `excel`"),
        FacultyFilterParams
    ),
    responses(
        (status = 200, description = "File attachment (application/pdf or text/csv)"),
        (status = 400, description = "Unsupported format or invalid filters"),
        (status = 502, description = "PDF converter unavailable")
    ),
    tag = "exports"
)]
pub async fn export_faculty(
    State(service): State<Arc<ExportService>>,
    Path(format): Path<String>,
    AppQuery(filter): AppQuery<FacultyFilterParams>,
) -> Result<ExportFile> {
    service.faculty(format.parse::<ExportFormat>()?, &filter).await
}

/// Export the enrollment listing with per-course and per-year summaries
#[utoipa::path(
    get,
    path = "/api/export/enrollment/{format}",
    params(
        ("format" = String, Path, description = "`pdf` or `excel`"),
        StudentFilterParams
    ),
    responses(
        (status = 200, description = "File attachment (application/pdf or text/csv)"),
        (status = 400, description = "Unsupported format or invalid filters"),
        (status = 502, description = "PDF converter unavailable")
    ),
    tag = "exports"
)]
pub async fn export_enrollment(
    State(service): State<Arc<ExportService>>,
    Path(format): Path<String>,
    AppQuery(filter): AppQuery<StudentFilterParams>,
) -> Result<ExportFile> {
    service.enrollment(format.parse::<ExportFormat>()?, &filter).await
}
