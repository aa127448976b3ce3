mod academic_year_handler;

pub use academic_year_handler::*;
