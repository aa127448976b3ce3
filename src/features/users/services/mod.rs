mod account_service;

pub use account_service::{create_account, update_account, AccountChanges};
