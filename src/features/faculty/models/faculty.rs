use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Employment type enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "employment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Contract => "contract",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "full_time" => Ok(EmploymentType::FullTime),
            "part_time" => Ok(EmploymentType::PartTime),
            "contract" => Ok(EmploymentType::Contract),
            _ => Err(format!("unknown employment type: {}", s)),
        }
    }
}

/// Faculty row joined with its account and department name
#[derive(Debug, Clone, FromRow)]
pub struct FacultyRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub employee_id: String,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
    pub position: Option<String>,
    pub employment_type: EmploymentType,
    pub salary: Option<Decimal>,
    pub hire_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub specialization: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_type_parsing() {
        assert_eq!("part_time".parse::<EmploymentType>(), Ok(EmploymentType::PartTime));
        assert_eq!("Full-Time".parse::<EmploymentType>(), Ok(EmploymentType::FullTime));
        assert!("intern".parse::<EmploymentType>().is_err());
    }

    #[test]
    fn test_employment_type_wire_format() {
        assert_eq!(
            serde_json::to_value(EmploymentType::PartTime).unwrap(),
            serde_json::json!("part_time")
        );
        assert_eq!(EmploymentType::Contract.to_string(), "contract");
    }
}
