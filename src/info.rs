//! Document metadata queries.
//!
//! Front-ends call [`get_pdf_info`] before registering a document in a
//! [`crate::session::Session`]: it is the single place a page count comes
//! from. Timestamps are optional everywhere - a filesystem that does not
//! track creation time yields an explicit "unknown" marker, never an error.

use lopdf::Document;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::InfoError;

/// Metadata for one PDF file.
#[derive(Debug, Clone, Serialize)]
pub struct PdfInfo {
    /// File name without directory components.
    pub file_name: String,

    /// Number of pages.
    pub num_pages: u32,

    /// File size in bytes.
    pub file_size: u64,

    /// Creation timestamp, when the filesystem tracks one.
    pub created: Option<SystemTime>,

    /// Last-modified timestamp, when available.
    pub modified: Option<SystemTime>,
}

impl PdfInfo {
    /// Render an optional timestamp for display.
    ///
    /// Absent timestamps render as `"unknown"`.
    pub fn timestamp_label(ts: Option<SystemTime>) -> String {
        match ts.and_then(|t| t.duration_since(UNIX_EPOCH).ok()) {
            Some(since_epoch) => format!("{}", since_epoch.as_secs()),
            None => "unknown".to_string(),
        }
    }

    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        let size = self.file_size;
        if size >= GB {
            format!("{:.2} GB", size as f64 / GB as f64)
        } else if size >= MB {
            format!("{:.2} MB", size as f64 / MB as f64)
        } else if size >= KB {
            format!("{:.2} KB", size as f64 / KB as f64)
        } else {
            format!("{size} bytes")
        }
    }
}

/// Query metadata for one PDF.
///
/// # Errors
///
/// Returns [`InfoError::Unreadable`] if the file cannot be opened or its
/// page count cannot be determined. Missing optional metadata (timestamps)
/// is not an error.
pub async fn get_pdf_info(path: &Path) -> Result<PdfInfo, InfoError> {
    let document = Document::load(path)
        .await
        .map_err(|e| InfoError::unreadable(path.to_path_buf(), e.to_string()))?;

    let num_pages = document.get_pages().len() as u32;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| InfoError::unreadable(path.to_path_buf(), e.to_string()))?;

    Ok(PdfInfo {
        file_name,
        num_pages,
        file_size: metadata.len(),
        created: metadata.created().ok(),
        modified: metadata.modified().ok(),
    })
}

/// Query metadata for many PDFs with bounded concurrency.
///
/// Results come back in input order, one per path. This sits outside any
/// compile invocation, so concurrent reads are fine here.
pub async fn info_all(paths: &[PathBuf], workers: usize) -> Vec<Result<PdfInfo, InfoError>> {
    use futures::stream::{self, StreamExt};

    let workers = workers.max(1);

    let tasks = paths.iter().enumerate().map(|(idx, path)| {
        let path = path.clone();
        async move { (idx, get_pdf_info(&path).await) }
    });

    let mut indexed: Vec<(usize, Result<PdfInfo, InfoError>)> = stream::iter(tasks)
        .buffer_unordered(workers)
        .collect::<Vec<_>>()
        .await;

    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, result)| result).collect()
}
