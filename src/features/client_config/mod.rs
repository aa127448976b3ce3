//! `GET /api/config`: route map and application name for the frontend.

pub mod handlers;
pub mod routes;

pub use handlers::ClientConfigDto;
