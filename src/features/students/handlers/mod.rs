mod student_handler;

pub use student_handler::*;
