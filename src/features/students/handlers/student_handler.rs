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
use crate::features::students::dtos::{
    CreateStudentDto, StudentFilterParams, StudentResponseDto, StudentStatsDto, UpdateStudentDto,
};
use crate::features::students::services::StudentService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List students with filters and pagination
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams, PaginationQuery),
    responses(
        (status = 200, description = "Page of students", body = ApiResponse<Vec<StudentResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "students"
)]
pub async fn list_students(
    State(service): State<Arc<StudentService>>,
    AppQuery(filter): AppQuery<StudentFilterParams>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<StudentResponseDto>>>> {
    let (students, meta) = service.list(&filter, &pagination).await?;
    Ok(Json(ApiResponse::paginated(students, meta)))
}

/// Grouped student counts for the filtered set.
///
/// Never fails on the data: when the statistics cannot be computed the
/// response carries `success: false` and the all-zero shape.
#[utoipa::path(
    get,
    path = "/api/students/stats",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Student statistics", body = ApiResponse<StudentStatsDto>),
    ),
    tag = "students"
)]
pub async fn student_stats(
    State(service): State<Arc<StudentService>>,
    AppQuery(filter): AppQuery<StudentFilterParams>,
) -> Json<ApiResponse<StudentStatsDto>> {
    match service.stats(&filter).await {
        Ok(stats) => Json(ApiResponse::success(Some(stats), None)),
        Err(e) => {
            tracing::error!("Failed to compute student statistics: {}", e);
            Json(ApiResponse::degraded(
                StudentStatsDto::default(),
                "Failed to fetch student statistics".to_string(),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = ApiResponse<StudentResponseDto>),
        (status = 404, description = "Student not found")
    ),
    tag = "students"
)]
pub async fn get_student(
    State(service): State<Arc<StudentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StudentResponseDto>>> {
    let student = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(student), None)))
}

/// Enroll a student together with their account
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = ApiResponse<StudentResponseDto>),
        (status = 422, description = "Validation error")
    ),
    tag = "students"
)]
pub async fn create_student(
    State(service): State<Arc<StudentService>>,
    AppJson(dto): AppJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponseDto>>)> {
    dto.validate()?;

    let student = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(student),
            Some("Student created successfully".to_string()),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = ApiResponse<StudentResponseDto>),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "students"
)]
pub async fn update_student(
    State(service): State<Arc<StudentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStudentDto>,
) -> Result<Json<ApiResponse<StudentResponseDto>>> {
    dto.validate()?;

    let student = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(student),
        Some("Student updated successfully".to_string()),
    )))
}

/// Archive a student
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student archived"),
        (status = 404, description = "Student not found")
    ),
    tag = "students"
)]
pub async fn archive_student(
    State(service): State<Arc<StudentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.archive(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Student archived successfully".to_string()),
    )))
}

/// Restore an archived student
#[utoipa::path(
    patch,
    path = "/api/students/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student restored", body = ApiResponse<StudentResponseDto>),
        (status = 404, description = "Archived student not found")
    ),
    tag = "students"
)]
pub async fn restore_student(
    State(service): State<Arc<StudentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StudentResponseDto>>> {
    let student = service.restore(id).await?;
    Ok(Json(ApiResponse::success(
        Some(student),
        Some("Student restored successfully".to_string()),
    )))
}
