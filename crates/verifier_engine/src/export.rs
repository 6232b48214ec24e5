use std::path::{Path, PathBuf};

use serde::Serialize;
use verifier_core::{EmailVerificationRecord, HealthSummary, VerificationReport};

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("export path has no file name: {0}")]
    MissingFileName(String),
}

/// JSON shape of an exported report.
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: &'a str,
    pub summary: HealthSummary,
    pub error_count: usize,
    pub records: &'a [EmailVerificationRecord],
}

impl<'a> ReportDocument<'a> {
    pub fn new(generated_at: &'a str, report: &'a VerificationReport) -> Self {
        Self {
            generated_at,
            summary: report.summary(),
            error_count: report.error_count(),
            records: report.records(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Atomically writes the document as pretty JSON to `path`.
pub fn export_report(path: &Path, document: &ReportDocument<'_>) -> Result<PathBuf, ExportError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ExportError::MissingFileName(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut content = document.to_json_pretty()?;
    content.push('\n');
    let writer = AtomicFileWriter::new(dir);
    Ok(writer.write(filename, content.as_bytes())?)
}
