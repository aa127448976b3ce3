use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::students::handlers;
use crate::features::students::services::StudentService;

pub fn routes(service: Arc<StudentService>) -> Router {
    Router::new()
        .route(
            "/api/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route("/api/students/stats", get(handlers::student_stats))
        .route(
            "/api/students/{id}",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::archive_student),
        )
        .route(
            "/api/students/{id}/restore",
            patch(handlers::restore_student),
        )
        .with_state(service)
}
