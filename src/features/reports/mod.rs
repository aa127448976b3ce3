//! Reports: a filtered page of records together with statistics over the
//! whole filtered set.
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | GET | `/api/reports/students` |
//! | GET | `/api/reports/faculty` |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ReportService;
