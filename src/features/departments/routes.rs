use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::departments::handlers;
use crate::features::departments::services::DepartmentService;

pub fn routes(service: Arc<DepartmentService>) -> Router {
    Router::new()
        .route(
            "/api/departments",
            get(handlers::list_departments).post(handlers::create_department),
        )
        .route(
            "/api/departments/{id}",
            get(handlers::get_department)
                .put(handlers::update_department)
                .delete(handlers::archive_department),
        )
        .route(
            "/api/departments/{id}/restore",
            patch(handlers::restore_department),
        )
        .with_state(service)
}
