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
use crate::features::courses::dtos::{
    CourseListQuery, CourseResponseDto, CreateCourseDto, UpdateCourseDto,
};
use crate::features::courses::services::CourseService;
use crate::shared::types::ApiResponse;

/// List courses, optionally narrowed to one department
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseListQuery),
    responses(
        (status = 200, description = "List of courses", body = ApiResponse<Vec<CourseResponseDto>>),
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(service): State<Arc<CourseService>>,
    AppQuery(query): AppQuery<CourseListQuery>,
) -> Result<Json<ApiResponse<Vec<CourseResponseDto>>>> {
    let courses = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(courses), None)))
}

/// Get course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = ApiResponse<CourseResponseDto>),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseResponseDto>>> {
    let course = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(course), None)))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<CourseResponseDto>),
        (status = 422, description = "Validation error")
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(service): State<Arc<CourseService>>,
    AppJson(dto): AppJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponseDto>>)> {
    dto.validate()?;

    let course = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(course),
            Some("Course created successfully".to_string()),
        )),
    ))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<CourseResponseDto>),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCourseDto>,
) -> Result<Json<ApiResponse<CourseResponseDto>>> {
    dto.validate()?;

    let course = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(course),
        Some("Course updated successfully".to_string()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course archived"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn archive_course(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.archive(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Course archived successfully".to_string()),
    )))
}

/// Restore an archived course
#[utoipa::path(
    patch,
    path = "/api/courses/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course restored", body = ApiResponse<CourseResponseDto>),
        (status = 404, description = "Archived course not found")
    ),
    tag = "courses"
)]
pub async fn restore_course(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseResponseDto>>> {
    let course = service.restore(id).await?;
    Ok(Json(ApiResponse::success(
        Some(course),
        Some("Course restored successfully".to_string()),
    )))
}
