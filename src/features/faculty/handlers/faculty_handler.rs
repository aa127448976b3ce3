use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::faculty::dtos::{
    CreateFacultyDto, FacultyFilterParams, FacultyResponseDto, FacultyStatsDto, UpdateFacultyDto,
};
use crate::features::faculty::services::FacultyService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List faculty with filters and pagination
#[utoipa::path(
    get,
    path = "/api/faculty",
    params(FacultyFilterParams, PaginationQuery),
    responses(
        (status = 200, description = "Page of faculty", body = ApiResponse<Vec<FacultyResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "faculty"
)]
pub async fn list_faculty(
    State(service): State<Arc<FacultyService>>,
    AppQuery(filter): AppQuery<FacultyFilterParams>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<FacultyResponseDto>>>> {
    let (faculty, meta) = service.list(&filter, &pagination).await?;
    Ok(Json(ApiResponse::paginated(faculty, meta)))
}

/// Grouped faculty counts and average salary for the filtered set.
///
/// Never fails on the data: when the statistics cannot be computed the
/// response carries `success: false` and the all-zero shape.
#[utoipa::path(
    get,
    path = "/api/faculty/stats",
    params(FacultyFilterParams),
    responses(
        (status = 200, description = "Faculty statistics", body = ApiResponse<FacultyStatsDto>),
    ),
    tag = "faculty"
)]
pub async fn faculty_stats(
    State(service): State<Arc<FacultyService>>,
    AppQuery(filter): AppQuery<FacultyFilterParams>,
) -> Json<ApiResponse<FacultyStatsDto>> {
    match service.stats(&filter).await {
        Ok(stats) => Json(ApiResponse::success(Some(stats), None)),
        Err(e) => {
            tracing::error!("Failed to compute faculty statistics: {}", e);
            Json(ApiResponse::degraded(
                FacultyStatsDto::default(),
                "Failed to fetch faculty statistics".to_string(),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/faculty/{id}",
    params(
        ("id" = Uuid, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Faculty found", body = ApiResponse<FacultyResponseDto>),
        (status = 404, description = "Faculty not found")
    ),
    tag = "faculty"
)]
pub async fn get_faculty(
    State(service): State<Arc<FacultyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FacultyResponseDto>>> {
    let faculty = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(faculty), None)))
}

/// Hire a faculty member together with their account
#[utoipa::path(
    post,
    path = "/api/faculty",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty created", body = ApiResponse<FacultyResponseDto>),
        (status = 422, description = "Validation error")
    ),
    tag = "faculty"
)]
pub async fn create_faculty(
    State(service): State<Arc<FacultyService>>,
    AppJson(dto): AppJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<ApiResponse<FacultyResponseDto>>)> {
    dto.validate()?;

    let faculty = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(faculty),
            Some("Faculty created successfully".to_string()),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/faculty/{id}",
    params(
        ("id" = Uuid, Path, description = "Faculty ID")
    ),
    request_body = UpdateFacultyDto,
    responses(
        (status = 200, description = "Faculty updated", body = ApiResponse<FacultyResponseDto>),
        (status = 404, description = "Faculty not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "faculty"
)]
pub async fn update_faculty(
    State(service): State<Arc<FacultyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateFacultyDto>,
) -> Result<Json<ApiResponse<FacultyResponseDto>>> {
    dto.validate()?;

    let faculty = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(faculty),
        Some("Faculty updated successfully".to_string()),
    )))
}

/// Archive a faculty member
#[utoipa::path(
    delete,
    path = "/api/faculty/{id}",
    params(
        ("id" = Uuid, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Faculty archived"),
        (status = 404, description = "Faculty not found")
    ),
    tag = "faculty"
)]
pub async fn archive_faculty(
    State(service): State<Arc<FacultyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.archive(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Faculty archived successfully".to_string()),
    )))
}

/// Restore an archived faculty member
#[utoipa::path(
    patch,
    path = "/api/faculty/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Faculty restored", body = ApiResponse<FacultyResponseDto>),
        (status = 404, description = "Archived faculty not found")
    ),
    tag = "faculty"
)]
pub async fn restore_faculty(
    State(service): State<Arc<FacultyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FacultyResponseDto>>> {
    let faculty = service.restore(id).await?;
    Ok(Json(ApiResponse::success(
        Some(faculty),
        Some("Faculty restored successfully".to_string()),
    )))
}
