/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Placeholder label for a missing relation in statistics and exports
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Placeholder for a missing value in CSV exports
pub const NOT_AVAILABLE: &str = "N/A";

/// Minimum length for account passwords
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Bounds for academic year start/end
pub const MIN_ACADEMIC_YEAR: i32 = 2000;
pub const MAX_ACADEMIC_YEAR: i32 = 2100;

/// Bounds for course credits
pub const MIN_COURSE_CREDITS: i16 = 1;
pub const MAX_COURSE_CREDITS: i16 = 6;
