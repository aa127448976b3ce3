use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::ApiResponse;

/// Named API routes, so the frontend never hard-codes paths
const ROUTES: &[(&str, &str)] = &[
    ("health", "/health"),
    ("docs", "/swagger-ui"),
    ("dashboard_summary", "/api/dashboard/summary"),
    ("students", "/api/students"),
    ("students_stats", "/api/students/stats"),
    ("student", "/api/students/{id}"),
    ("student_restore", "/api/students/{id}/restore"),
    ("faculty", "/api/faculty"),
    ("faculty_stats", "/api/faculty/stats"),
    ("faculty_member", "/api/faculty/{id}"),
    ("faculty_restore", "/api/faculty/{id}/restore"),
    ("courses", "/api/courses"),
    ("course", "/api/courses/{id}"),
    ("course_restore", "/api/courses/{id}/restore"),
    ("departments", "/api/departments"),
    ("department", "/api/departments/{id}"),
    ("department_restore", "/api/departments/{id}/restore"),
    ("academic_years", "/api/academic-years"),
    ("academic_years_current", "/api/academic-years/current"),
    ("academic_year", "/api/academic-years/{id}"),
    ("academic_year_restore", "/api/academic-years/{id}/restore"),
    ("academic_year_set_current", "/api/academic-years/{id}/set-current"),
    ("reports_students", "/api/reports/students"),
    ("reports_faculty", "/api/reports/faculty"),
    ("export_students", "/api/export/students/{format}"),
    ("export_faculty", "/api/export/faculty/{format}"),
    ("export_enrollment", "/api/export/enrollment/{format}"),
];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientConfigDto {
    pub app_name: String,
    pub version: String,
    pub routes: BTreeMap<String, String>,
}

impl ClientConfigDto {
    pub fn new(app_name: &str, version: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            version: version.to_string(),
            routes: ROUTES
                .iter()
                .map(|(name, path)| (name.to_string(), path.to_string()))
                .collect(),
        }
    }
}

/// Route map for the frontend
#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Client configuration", body = ApiResponse<ClientConfigDto>),
    ),
    tag = "config"
)]
pub async fn get_client_config(
    State(config): State<Arc<ClientConfigDto>>,
) -> Json<ApiResponse<ClientConfigDto>> {
    Json(ApiResponse::success(Some(config.as_ref().clone()), None))
}
