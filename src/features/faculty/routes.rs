use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::faculty::handlers;
use crate::features::faculty::services::FacultyService;

pub fn routes(service: Arc<FacultyService>) -> Router {
    Router::new()
        .route(
            "/api/faculty",
            get(handlers::list_faculty).post(handlers::create_faculty),
        )
        .route("/api/faculty/stats", get(handlers::faculty_stats))
        .route(
            "/api/faculty/{id}",
            get(handlers::get_faculty)
                .put(handlers::update_faculty)
                .delete(handlers::archive_faculty),
        )
        .route(
            "/api/faculty/{id}/restore",
            patch(handlers::restore_faculty),
        )
        .with_state(service)
}
