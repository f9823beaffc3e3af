//! Output document writing.
//!
//! The assembled document is written exactly once, after all pages are
//! collected in memory. Writes go to a temp file first and are renamed
//! into place, so a failed write never leaves a partial output artifact
//! at the target path; the temp file itself is removed on failure.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{AssemblyError, Result};

/// Options for writing the output PDF.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temp file and rename into place.
    pub atomic: bool,

    /// Compress object streams before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            buffer_size: 8192,
        }
    }
}

/// Writer for the assembled output document.
pub struct OutputWriter {
    options: WriteOptions,
}

impl OutputWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Write the document to `path`, overwriting any existing file.
    ///
    /// Serialization runs on the blocking pool; the document is handed
    /// over by value since the compile is finished with it.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::WriteFailed`] if the file cannot be
    /// created, written, or renamed into place.
    pub async fn save(&self, mut document: Document, path: &Path) -> Result<()> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || {
            if options.compress {
                document.compress();
            }

            let write_path = if options.atomic {
                temp_sibling(&path_buf)
            } else {
                path_buf.clone()
            };

            let result = write_document(&mut document, &write_path, &path_buf, &options);

            // A failed atomic write must not strand the temp artifact.
            if result.is_err() && options.atomic {
                let _ = std::fs::remove_file(&write_path);
            }

            result
        })
        .await
        .map_err(|e| {
            AssemblyError::write_failed(
                PathBuf::from(path),
                std::io::Error::other(format!("write task failed: {e}")),
            )
        })??;

        Ok(())
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Temp path next to `path`, formed by appending `.tmp` to the full file
/// name so an unrelated sibling like `out.tmp` is never overwritten.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_document(
    document: &mut Document,
    write_path: &Path,
    final_path: &Path,
    options: &WriteOptions,
) -> Result<()> {
    let file = std::fs::File::create(write_path)
        .map_err(|e| AssemblyError::write_failed(write_path.to_path_buf(), e))?;

    let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

    document.save_to(&mut writer).map_err(|e| {
        AssemblyError::write_failed(write_path.to_path_buf(), std::io::Error::other(e))
    })?;

    writer
        .flush()
        .map_err(|e| AssemblyError::write_failed(write_path.to_path_buf(), e))?;

    if options.atomic {
        std::fs::rename(write_path, final_path)
            .map_err(|e| AssemblyError::write_failed(final_path.to_path_buf(), e))?;
    }

    Ok(())
}
