use std::sync::Arc;

use axum::{extract::State, Json};

use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

// ============================================================================
// Summary
// ============================================================================

/// Get the dashboard summary.
///
/// Failures are logged and answered with the all-zero summary and
/// `success: false`.
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Json<ApiResponse<DashboardSummaryDto>> {
    match service.get_summary().await {
        Ok(summary) => Json(ApiResponse::success(Some(summary), None)),
        Err(e) => {
            tracing::error!("Failed to compute dashboard summary: {}", e);
            Json(ApiResponse::degraded(
                DashboardSummaryDto::default(),
                "Failed to fetch dashboard summary".to_string(),
            ))
        }
    }
}
