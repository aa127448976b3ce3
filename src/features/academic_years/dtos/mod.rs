mod academic_year_dto;

pub use academic_year_dto::*;
