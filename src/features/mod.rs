pub mod academic_years;
pub mod client_config;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod exports;
pub mod faculty;
pub mod reports;
pub mod students;
pub mod users;
