mod student_dto;
mod student_filter;
mod student_stats;

pub use student_dto::*;
pub use student_filter::StudentFilterParams;
pub use student_stats::StudentStatsDto;

#[cfg(test)]
pub(crate) use student_dto::tests;
