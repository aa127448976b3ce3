use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::faculty::dtos::{FacultyResponseDto, FacultyStatsDto};
use crate::features::students::dtos::{StudentResponseDto, StudentStatsDto};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentReportDto {
    pub records: Vec<StudentResponseDto>,
    pub statistics: StudentStatsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyReportDto {
    pub records: Vec<FacultyResponseDto>,
    pub statistics: FacultyStatsDto,
}
