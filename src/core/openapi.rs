use utoipa::{Modify, OpenApi};

use crate::features::academic_years::{
    dtos as academic_years_dtos, handlers as academic_years_handlers,
    models as academic_years_models,
};
use crate::features::client_config::handlers as client_config_handlers;
use crate::features::courses::{dtos as courses_dtos, handlers as courses_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::departments::{dtos as departments_dtos, handlers as departments_handlers};
use crate::features::exports::handlers as exports_handlers;
use crate::features::faculty::{
    dtos as faculty_dtos, handlers as faculty_handlers, models as faculty_models,
};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::students::{
    dtos as students_dtos, handlers as students_handlers, models as students_models,
};
use crate::shared::aggregation::GroupCount;
use crate::shared::types::{ApiResponse, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Config
        client_config_handlers::get_client_config,
        // Dashboard
        dashboard_handlers::get_summary,
        // Departments
        departments_handlers::list_departments,
        departments_handlers::get_department,
        departments_handlers::create_department,
        departments_handlers::update_department,
        departments_handlers::archive_department,
        departments_handlers::restore_department,
        // Courses
        courses_handlers::list_courses,
        courses_handlers::get_course,
        courses_handlers::create_course,
        courses_handlers::update_course,
        courses_handlers::archive_course,
        courses_handlers::restore_course,
        // Academic years
        academic_years_handlers::list_academic_years,
        academic_years_handlers::get_current_academic_year,
        academic_years_handlers::get_academic_year,
        academic_years_handlers::create_academic_year,
        academic_years_handlers::update_academic_year,
        academic_years_handlers::archive_academic_year,
        academic_years_handlers::restore_academic_year,
        academic_years_handlers::set_current_academic_year,
        // Students
        students_handlers::list_students,
        students_handlers::student_stats,
        students_handlers::get_student,
        students_handlers::create_student,
        students_handlers::update_student,
        students_handlers::archive_student,
        students_handlers::restore_student,
        // Faculty
        faculty_handlers::list_faculty,
        faculty_handlers::faculty_stats,
        faculty_handlers::get_faculty,
        faculty_handlers::create_faculty,
        faculty_handlers::update_faculty,
        faculty_handlers::archive_faculty,
        faculty_handlers::restore_faculty,
        // Reports
        reports_handlers::student_report,
        reports_handlers::faculty_report,
        // Exports
        exports_handlers::export_students,
        exports_handlers::export_faculty,
        exports_handlers::export_enrollment,
    ),
    components(
        schemas(
            // Shared
            PaginationMeta,
            GroupCount,
            // Config
            client_config_handlers::ClientConfigDto,
            ApiResponse<client_config_handlers::ClientConfigDto>,
            // Dashboard
            dashboard_dtos::DashboardCounts,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            // Departments
            departments_dtos::CreateDepartmentDto,
            departments_dtos::UpdateDepartmentDto,
            departments_dtos::DepartmentResponseDto,
            ApiResponse<departments_dtos::DepartmentResponseDto>,
            ApiResponse<Vec<departments_dtos::DepartmentResponseDto>>,
            // Courses
            courses_dtos::CreateCourseDto,
            courses_dtos::UpdateCourseDto,
            courses_dtos::CourseResponseDto,
            ApiResponse<courses_dtos::CourseResponseDto>,
            ApiResponse<Vec<courses_dtos::CourseResponseDto>>,
            // Academic years
            academic_years_models::AcademicYearStatus,
            academic_years_dtos::CreateAcademicYearDto,
            academic_years_dtos::UpdateAcademicYearDto,
            academic_years_dtos::AcademicYearResponseDto,
            ApiResponse<academic_years_dtos::AcademicYearResponseDto>,
            ApiResponse<Vec<academic_years_dtos::AcademicYearResponseDto>>,
            // Students
            students_models::StudentCategory,
            students_models::StudentDocuments,
            students_dtos::CreateStudentDto,
            students_dtos::UpdateStudentDto,
            students_dtos::StudentResponseDto,
            students_dtos::StudentStatsDto,
            ApiResponse<students_dtos::StudentResponseDto>,
            ApiResponse<Vec<students_dtos::StudentResponseDto>>,
            ApiResponse<students_dtos::StudentStatsDto>,
            // Faculty
            faculty_models::EmploymentType,
            faculty_dtos::CreateFacultyDto,
            faculty_dtos::UpdateFacultyDto,
            faculty_dtos::FacultyResponseDto,
            faculty_dtos::FacultyStatsDto,
            ApiResponse<faculty_dtos::FacultyResponseDto>,
            ApiResponse<Vec<faculty_dtos::FacultyResponseDto>>,
            ApiResponse<faculty_dtos::FacultyStatsDto>,
            // Reports
            reports_dtos::StudentReportDto,
            reports_dtos::FacultyReportDto,
            ApiResponse<reports_dtos::StudentReportDto>,
            ApiResponse<reports_dtos::FacultyReportDto>,
        )
    ),
    tags(
        (name = "config", description = "Client configuration"),
        (name = "dashboard", description = "Headline counts for the landing page"),
        (name = "departments", description = "Academic departments"),
        (name = "courses", description = "Courses offered by departments"),
        (name = "academic-years", description = "Academic years and the current year"),
        (name = "students", description = "Student records, filters and statistics"),
        (name = "faculty", description = "Faculty records, filters and statistics"),
        (name = "reports", description = "Filtered records with matching statistics"),
        (name = "exports", description = "CSV and PDF downloads"),
    ),
    info(
        title = "Campus Registry API",
        version = "0.1.0",
        description = "API documentation for Campus Registry",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
