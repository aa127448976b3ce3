//! Faculty: employment records, each paired with one user account.
//!
//! Mirrors the students feature. Statistics add `by_employment_type`,
//! `by_position` and `average_salary`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FacultyService;
