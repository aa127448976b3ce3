mod faculty_service;

pub use faculty_service::FacultyService;
