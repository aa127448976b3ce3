use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::exports::handlers;
use crate::features::exports::services::ExportService;

pub fn routes(service: Arc<ExportService>) -> Router {
    Router::new()
        .route("/api/export/students/{format}", get(handlers::export_students))
        .route("/api/export/faculty/{format}", get(handlers::export_faculty))
        .route("/api/export/enrollment/{format}", get(handlers::export_enrollment))
        .with_state(service)
}
