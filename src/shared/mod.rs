pub mod aggregation;
pub mod archive;
pub mod constants;
pub mod filters;
pub mod templates;
pub mod types;
pub mod validation;
