//! Source document loading.
//!
//! Loading is a scoped acquisition: the assembler opens one source, pulls
//! the pages it needs, and drops the document before touching the next.
//! No file handle outlives its extraction pass.

use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::error::{AssemblyError, Result};

/// A loaded source document with its page count.
#[derive(Debug)]
pub struct LoadedSource {
    /// The parsed PDF object graph.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: u32,
}

/// Reader for source PDFs.
#[derive(Debug, Clone)]
pub struct SourceReader {
    /// Whether to reject documents with an empty page tree.
    verify: bool,
}

impl SourceReader {
    /// Create a new reader with page-tree verification enabled.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips verification.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single source document.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::SourceUnreadable`] if the file cannot be
    /// read, is not a valid PDF, or (with verification) has no pages.
    pub async fn load(&self, path: &Path) -> Result<LoadedSource> {
        let path_buf = path.to_path_buf();

        let document = Document::load(&path_buf)
            .await
            .map_err(|e| AssemblyError::source_unreadable(path_buf.clone(), e.to_string()))?;

        let page_count = document.get_pages().len() as u32;

        if self.verify && page_count == 0 {
            return Err(AssemblyError::source_unreadable(
                path_buf,
                "PDF has no pages",
            ));
        }

        Ok(LoadedSource {
            document,
            path: path_buf,
            page_count,
        })
    }
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::testutil::{create_multi_page_pdf, write_pdf};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_counts_pages() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_pdf(&temp_dir, "three.pdf", create_multi_page_pdf(3));

        let reader = SourceReader::new();
        let loaded = reader.load(&path).await.unwrap();

        assert_eq!(loaded.page_count, 3);
        assert_eq!(loaded.path, path);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_source_unreadable() {
        let reader = SourceReader::new();
        let err = reader.load(Path::new("/nonexistent.pdf")).await.unwrap_err();

        assert!(matches!(err, AssemblyError::SourceUnreadable { .. }));
    }

    #[tokio::test]
    async fn test_load_garbage_is_source_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let reader = SourceReader::new();
        let err = reader.load(&path).await.unwrap_err();

        assert!(matches!(err, AssemblyError::SourceUnreadable { .. }));
    }
}
