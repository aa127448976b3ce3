mod faculty;

pub use faculty::{EmploymentType, FacultyRecord};
