mod academic_year;

pub use academic_year::{AcademicYearRecord, AcademicYearStatus};
