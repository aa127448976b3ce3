use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for department and course codes
    /// Alphanumeric segments separated by single hyphens
    /// - Valid: "CS", "BSIT", "ENG-101", "cs101"
    /// - Invalid: "-CS", "CS-", "CS--101", "CS 101", "CS_101"
    pub static ref CODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap();

    /// Regex for student numbers and employee ids
    /// - Valid: "2024-00123", "EMP-0042", "S12345"
    /// - Invalid: "", "2024 00123", "#12"
    pub static ref BUSINESS_KEY_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").unwrap();
}
