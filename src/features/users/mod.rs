//! Accounts paired 1:1 with student and faculty records.
//!
//! Users are never exposed through their own endpoints; they are created and
//! updated inside the same transaction as the record that wraps them.

pub mod models;
pub mod services;
