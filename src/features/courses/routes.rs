use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::courses::handlers;
use crate::features::courses::services::CourseService;

pub fn routes(service: Arc<CourseService>) -> Router {
    Router::new()
        .route(
            "/api/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/api/courses/{id}",
            get(handlers::get_course)
                .put(handlers::update_course)
                .delete(handlers::archive_course),
        )
        .route(
            "/api/courses/{id}/restore",
            patch(handlers::restore_course),
        )
        .with_state(service)
}
