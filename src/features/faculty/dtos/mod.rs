mod faculty_dto;
mod faculty_filter;
mod faculty_stats;

pub use faculty_dto::*;
pub use faculty_filter::FacultyFilterParams;
pub use faculty_stats::FacultyStatsDto;

#[cfg(test)]
pub(crate) use faculty_dto::tests;
