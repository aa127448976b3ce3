//! Students: enrollment records, each paired with one user account.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/students` | Filtered, paginated list |
//! | GET | `/api/students/stats` | Grouped counts over the filtered set |
//! | POST | `/api/students` | Create student and account |
//! | GET | `/api/students/{id}` | Show |
//! | PUT | `/api/students/{id}` | Update |
//! | DELETE | `/api/students/{id}` | Archive |
//! | PATCH | `/api/students/{id}/restore` | Restore |
//!
//! Filters: `department_id`, `course_id`, `academic_year_id`, `category`,
//! `search` (name, email, student number) and `archived`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::StudentService;
