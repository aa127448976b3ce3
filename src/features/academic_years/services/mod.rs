mod academic_year_service;

pub use academic_year_service::AcademicYearService;
