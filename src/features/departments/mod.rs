//! Departments: reference data owning courses, students and faculty.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/departments` | List (live or `?archived=true`) |
//! | POST | `/api/departments` | Create |
//! | GET | `/api/departments/{id}` | Show |
//! | PUT | `/api/departments/{id}` | Update |
//! | DELETE | `/api/departments/{id}` | Archive |
//! | PATCH | `/api/departments/{id}/restore` | Restore |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DepartmentService;
