use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::core::error::AppError;

/// What is being exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Students,
    Faculty,
    Enrollment,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Students => "students",
            ExportKind::Faculty => "faculty",
            ExportKind::Enrollment => "enrollment",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExportKind::Students => "Student Report",
            ExportKind::Faculty => "Faculty Report",
            ExportKind::Enrollment => "Enrollment Report",
        }
    }
}

/// Output format path segment. `excel` produces a CSV body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Excel => "text/csv; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" | "csv" => Ok(ExportFormat::Excel),
            other => Err(AppError::BadRequest(format!(
                "Unsupported export format '{}'; expected 'pdf' or 'excel'",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => f.write_str("pdf"),
            ExportFormat::Excel => f.write_str("excel"),
        }
    }
}

/// A rendered export, ready to be sent as an attachment
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ExportFile {
    pub fn new(kind: ExportKind, format: ExportFormat, date: NaiveDate, body: Vec<u8>) -> Self {
        Self {
            filename: export_filename(kind, format, date),
            content_type: format.content_type(),
            body,
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// `<kind>_<YYYY-MM-DD>.<ext>`
pub fn export_filename(kind: ExportKind, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        kind.as_str(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
