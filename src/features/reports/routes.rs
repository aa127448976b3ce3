use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/reports/students", get(handlers::student_report))
        .route("/api/reports/faculty", get(handlers::faculty_report))
        .with_state(service)
}
