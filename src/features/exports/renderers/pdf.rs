//! HTML-to-PDF conversion via headless Chrome/Chromium.
//!
//! The HTML document is written to a temporary file, printed by the browser
//! to a sibling PDF file, and both files are removed afterwards. Page size
//! and orientation come from the document's CSS `@page` rule.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::ExportError;

/// Upper bound for a single conversion
const CONVERSION_TIMEOUT: Duration = Duration::from_secs(60);

/// Browser executables tried in order when no converter is configured
const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
];

pub struct PdfConverter {
    /// Converter configured through `PDF_CONVERTER`
    configured: Option<String>,
    /// Auto-detected converter, resolved on first use
    detected: OnceCell<Option<String>>,
}

impl PdfConverter {
    pub fn new(configured: Option<String>) -> Self {
        Self {
            configured,
            detected: OnceCell::new(),
        }
    }

    async fn detect_chrome() -> Option<String> {
        for candidate in CHROME_CANDIDATES {
            let version_check = Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;

            if matches!(version_check, Ok(status) if status.success()) {
                tracing::info!("Using PDF converter: {}", candidate);
                return Some((*candidate).to_string());
            }
        }

        tracing::warn!("No Chrome/Chromium executable found for PDF exports");
        None
    }

    async fn converter(&self) -> Option<&str> {
        if let Some(configured) = &self.configured {
            return Some(configured.as_str());
        }

        self.detected
            .get_or_init(Self::detect_chrome)
            .await
            .as_deref()
    }

    /// Render `html` to PDF bytes
    pub async fn convert(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        let converter = self
            .converter()
            .await
            .ok_or(ExportError::ConverterNotFound)?;

        let stem = format!("campus_registry_export_{}", Uuid::new_v4());
        let html_path = std::env::temp_dir().join(format!("{}.html", stem));
        let pdf_path = std::env::temp_dir().join(format!("{}.pdf", stem));

        tokio::fs::write(&html_path, html).await?;
        let result = run_chrome(converter, &html_path, &pdf_path).await;
        let bytes = match result {
            Ok(()) => tokio::fs::read(&pdf_path).await.map_err(ExportError::from),
            Err(e) => Err(e),
        };

        for path in [&html_path, &pdf_path] {
            if let Err(e) = tokio::fs::remove_file(path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove export temp file {}: {}", path.display(), e);
                }
            }
        }

        bytes
    }
}

fn chrome_args(html_path: &Path, pdf_path: &Path) -> Vec<String> {
    vec![
        "--headless=new".to_string(),
        "--disable-gpu".to_string(),
        "--no-sandbox".to_string(),
        "--no-pdf-header-footer".to_string(),
        "--run-all-compositor-stages-before-draw".to_string(),
        format!("--print-to-pdf={}", pdf_path.display()),
        format!("file://{}", html_path.display()),
    ]
}

async fn run_chrome(converter: &str, html_path: &Path, pdf_path: &Path) -> Result<(), ExportError> {
    let child = Command::new(converter)
        .args(chrome_args(html_path, pdf_path))
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ExportError::ConversionFailed(format!("failed to start {}: {}", converter, e)))?;

    let output = tokio::time::timeout(CONVERSION_TIMEOUT, child.wait_with_output())
        .await
        .map_err(|_| ExportError::ConversionFailed("converter timed out".to_string()))??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::error!("PDF converter exited with {}: {}", output.status, stderr.trim());
        return Err(ExportError::ConversionFailed(format!(
            "converter exited with {}",
            output.status
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_args_point_at_temp_files() {
        let args = chrome_args(Path::new("/tmp/in.html"), Path::new("/tmp/out.pdf"));
        assert!(args.contains(&"--print-to-pdf=/tmp/out.pdf".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("file:///tmp/in.html"));
        assert!(args.iter().any(|a| a.starts_with("--headless")));
    }

    #[tokio::test]
    async fn test_missing_configured_converter_fails_conversion() {
        let converter = PdfConverter::new(Some("/nonexistent/pdf-converter".to_string()));
        let result = converter.convert("<html></html>").await;
        assert!(matches!(result, Err(ExportError::ConversionFailed(_))));
    }
}
