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
use crate::features::academic_years::dtos::{
    AcademicYearResponseDto, CreateAcademicYearDto, UpdateAcademicYearDto,
};
use crate::features::academic_years::services::AcademicYearService;
use crate::shared::types::{ApiResponse, ReferenceListQuery};

/// List academic years
#[utoipa::path(
    get,
    path = "/api/academic-years",
    params(ReferenceListQuery),
    responses(
        (status = 200, description = "List of academic years", body = ApiResponse<Vec<AcademicYearResponseDto>>),
    ),
    tag = "academic-years"
)]
pub async fn list_academic_years(
    State(service): State<Arc<AcademicYearService>>,
    AppQuery(query): AppQuery<ReferenceListQuery>,
) -> Result<Json<ApiResponse<Vec<AcademicYearResponseDto>>>> {
    let academic_years = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(academic_years), None)))
}

/// Get academic year by id
#[utoipa::path(
    get,
    path = "/api/academic-years/{id}",
    params(
        ("id" = Uuid, Path, description = "Academic year ID")
    ),
    responses(
        (status = 200, description = "Academic year found", body = ApiResponse<AcademicYearResponseDto>),
        (status = 404, description = "Academic year not found")
    ),
    tag = "academic-years"
)]
pub async fn get_academic_year(
    State(service): State<Arc<AcademicYearService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AcademicYearResponseDto>>> {
    let academic_year = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(academic_year), None)))
}

/// Create an academic year
#[utoipa::path(
    post,
    path = "/api/academic-years",
    request_body = CreateAcademicYearDto,
    responses(
        (status = 201, description = "Academic year created", body = ApiResponse<AcademicYearResponseDto>),
        (status = 422, description = "Validation error")
    ),
    tag = "academic-years"
)]
pub async fn create_academic_year(
    State(service): State<Arc<AcademicYearService>>,
    AppJson(dto): AppJson<CreateAcademicYearDto>,
) -> Result<(StatusCode, Json<ApiResponse<AcademicYearResponseDto>>)> {
    dto.validate()?;
    dto.check_year_order()?;

    let academic_year = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(academic_year),
            Some("Academic year created successfully".to_string()),
        )),
    ))
}

/// Update an academic year
#[utoipa::path(
    put,
    path = "/api/academic-years/{id}",
    params(
        ("id" = Uuid, Path, description = "Academic year ID")
    ),
    request_body = UpdateAcademicYearDto,
    responses(
        (status = 200, description = "Academic year updated", body = ApiResponse<AcademicYearResponseDto>),
        (status = 404, description = "Academic year not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "academic-years"
)]
pub async fn update_academic_year(
    State(service): State<Arc<AcademicYearService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAcademicYearDto>,
) -> Result<Json<ApiResponse<AcademicYearResponseDto>>> {
    dto.validate()?;
    dto.check_year_order()?;

    let academic_year = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(academic_year),
        Some("Academic year updated successfully".to_string()),
    )))
}

/// Archive an academic year
#[utoipa::path(
    delete,
    path = "/api/academic-years/{id}",
    params(
        ("id" = Uuid, Path, description = "Academic year ID")
    ),
    responses(
        (status = 200, description = "Academic year archived; it stops being current"),
        (status = 404, description = "Academic year not found")
    ),
    tag = "academic-years"
)]
pub async fn archive_academic_year(
    State(service): State<Arc<AcademicYearService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.archive(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Academic year archived successfully".to_string()),
    )))
}

/// Restore an archived academic year
#[utoipa::path(
    patch,
    path = "/api/academic-years/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Academic year ID")
    ),
    responses(
        (status = 200, description = "Academic year restored", body = ApiResponse<AcademicYearResponseDto>),
        (status = 404, description = "Archived academic year not found")
    ),
    tag = "academic-years"
)]
pub async fn restore_academic_year(
    State(service): State<Arc<AcademicYearService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AcademicYearResponseDto>>> {
    let academic_year = service.restore(id).await?;
    Ok(Json(ApiResponse::success(
        Some(academic_year),
        Some("Academic year restored successfully".to_string()),
    )))
}

/// Get the current academic year
#[utoipa::path(
    get,
    path = "/api/academic-years/current",
    responses(
        (status = 200, description = "Current academic year", body = ApiResponse<AcademicYearResponseDto>),
        (status = 404, description = "No current academic year")
    ),
    tag = "academic-years"
)]
pub async fn get_current_academic_year(
    State(service): State<Arc<AcademicYearService>>,
) -> Result<Json<ApiResponse<AcademicYearResponseDto>>> {
    let academic_year = service.current().await?;
    Ok(Json(ApiResponse::success(Some(academic_year), None)))
}

/// Make an academic year the current one
#[utoipa::path(
    patch,
    path = "/api/academic-years/{id}/set-current",
    params(
        ("id" = Uuid, Path, description = "Academic year ID")
    ),
    responses(
        (status = 200, description = "Academic year is now current", body = ApiResponse<AcademicYearResponseDto>),
        (status = 404, description = "Academic year not found")
    ),
    tag = "academic-years"
)]
pub async fn set_current_academic_year(
    State(service): State<Arc<AcademicYearService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AcademicYearResponseDto>>> {
    let academic_year = service.set_current(id).await?;
    Ok(Json(ApiResponse::success(
        Some(academic_year),
        Some("Current academic year updated successfully".to_string()),
    )))
}
