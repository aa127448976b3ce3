//! Academic years. At most one year is current at any time; switching the
//! current year clears the previous one inside the same transaction.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/academic-years` | List (live or `?archived=true`) |
//! | POST | `/api/academic-years` | Create |
//! | GET | `/api/academic-years/current` | Current year |
//! | GET | `/api/academic-years/{id}` | Show |
//! | PUT | `/api/academic-years/{id}` | Update |
//! | DELETE | `/api/academic-years/{id}` | Archive |
//! | PATCH | `/api/academic-years/{id}/restore` | Restore |
//! | PATCH | `/api/academic-years/{id}/set-current` | Make current |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AcademicYearService;
