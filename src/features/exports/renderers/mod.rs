//! Output renderers: CSV bodies and HTML documents converted to PDF.

pub mod csv;
pub mod pdf;

use thiserror::Error;

use crate::core::error::AppError;
use crate::shared::templates::TemplateError;

/// Errors raised while producing an export file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No PDF converter available: install Chrome/Chromium or set PDF_CONVERTER")]
    ConverterNotFound,

    #[error("PDF conversion failed: {0}")]
    ConversionFailed(String),

    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::ConverterNotFound | ExportError::ConversionFailed(_) => {
                AppError::ExternalServiceError(e.to_string())
            }
            ExportError::Io(_) | ExportError::Template(_) => {
                tracing::error!("Export rendering failed: {}", e);
                AppError::Internal(e.to_string())
            }
        }
    }
}
