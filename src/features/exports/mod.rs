//! File exports of filtered record sets.
//!
//! `GET /api/export/{students|faculty|enrollment}/{pdf|excel}` accepts the
//! same filters as the matching list endpoint and answers with an attachment
//! named `<kind>_<YYYY-MM-DD>.<ext>`. The `excel` format is a CSV body.

pub mod dtos;
pub mod handlers;
pub mod renderers;
pub mod routes;
pub mod services;

pub use services::ExportService;
