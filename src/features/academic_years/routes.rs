use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::academic_years::handlers;
use crate::features::academic_years::services::AcademicYearService;

pub fn routes(service: Arc<AcademicYearService>) -> Router {
    Router::new()
        .route(
            "/api/academic-years",
            get(handlers::list_academic_years).post(handlers::create_academic_year),
        )
        .route(
            "/api/academic-years/current",
            get(handlers::get_current_academic_year),
        )
        .route(
            "/api/academic-years/{id}",
            get(handlers::get_academic_year)
                .put(handlers::update_academic_year)
                .delete(handlers::archive_academic_year),
        )
        .route(
            "/api/academic-years/{id}/restore",
            patch(handlers::restore_academic_year),
        )
        .route(
            "/api/academic-years/{id}/set-current",
            patch(handlers::set_current_academic_year),
        )
        .with_state(service)
}
