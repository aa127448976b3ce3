mod faculty_handler;

pub use faculty_handler::*;
