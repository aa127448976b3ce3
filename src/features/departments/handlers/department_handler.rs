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
use crate::features::departments::dtos::{
    CreateDepartmentDto, DepartmentResponseDto, UpdateDepartmentDto,
};
use crate::features::departments::services::DepartmentService;
use crate::shared::types::{ApiResponse, ReferenceListQuery};

/// List departments
#[utoipa::path(
    get,
    path = "/api/departments",
    params(ReferenceListQuery),
    responses(
        (status = 200, description = "List of departments", body = ApiResponse<Vec<DepartmentResponseDto>>),
    ),
    tag = "departments"
)]
pub async fn list_departments(
    State(service): State<Arc<DepartmentService>>,
    AppQuery(query): AppQuery<ReferenceListQuery>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    let departments = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(departments), None)))
}

/// Get department by id
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = ApiResponse<DepartmentResponseDto>),
        (status = 404, description = "Department not found")
    ),
    tag = "departments"
)]
pub async fn get_department(
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    let department = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(department), None)))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = ApiResponse<DepartmentResponseDto>),
        (status = 422, description = "Validation error")
    ),
    tag = "departments"
)]
pub async fn create_department(
    State(service): State<Arc<DepartmentService>>,
    AppJson(dto): AppJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<ApiResponse<DepartmentResponseDto>>)> {
    dto.validate()?;

    let department = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(department),
            Some("Department created successfully".to_string()),
        )),
    ))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    request_body = UpdateDepartmentDto,
    responses(
        (status = 200, description = "Department updated", body = ApiResponse<DepartmentResponseDto>),
        (status = 404, description = "Department not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "departments"
)]
pub async fn update_department(
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateDepartmentDto>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    dto.validate()?;

    let department = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(department),
        Some("Department updated successfully".to_string()),
    )))
}

/// Archive a department
#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department archived"),
        (status = 404, description = "Department not found")
    ),
    tag = "departments"
)]
pub async fn archive_department(
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.archive(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Department archived successfully".to_string()),
    )))
}

/// Restore an archived department
#[utoipa::path(
    patch,
    path = "/api/departments/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department restored", body = ApiResponse<DepartmentResponseDto>),
        (status = 404, description = "Archived department not found")
    ),
    tag = "departments"
)]
pub async fn restore_department(
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    let department = service.restore(id).await?;
    Ok(Json(ApiResponse::success(
        Some(department),
        Some("Department restored successfully".to_string()),
    )))
}
