//! Core document assembly.
//!
//! The assembler turns a [`CompilationPlan`] into one output PDF. Pages are
//! collected in memory in plan order - cover material first, then every
//! source's regular selection in caller order - and the output file is
//! written exactly once at the end. Any failure before that final write
//! leaves no output file behind.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::assemble::cover;
use crate::assemble::pages::PageCollector;
use crate::error::{AssemblyError, Result};
use crate::io::{OutputWriter, SourceReader};
use crate::plan::{CompilationPlan, MissingSelectionPolicy, PlannedSource};

/// Statistics about a completed compile.
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    /// Total pages written to the output.
    pub pages_written: usize,

    /// Pages contributed by the cover (generated plus extracted).
    pub cover_pages: usize,

    /// Number of source documents that contributed at least one page.
    pub sources_used: usize,

    /// Where the output was written.
    pub output_path: PathBuf,

    /// Wall-clock time for the whole compile.
    pub assembly_time: Duration,
}

/// Assembles output documents from compilation plans.
///
/// Holds no state between compiles and no global state at all; callers
/// wanting to serialize compiles on one output path must do so themselves.
pub struct Assembler {
    reader: SourceReader,
    writer: OutputWriter,
}

impl Assembler {
    /// Create an assembler with default I/O behavior.
    pub fn new() -> Self {
        Self {
            reader: SourceReader::new(),
            writer: OutputWriter::new(),
        }
    }

    /// Create an assembler with custom reader and writer.
    pub fn with_io(reader: SourceReader, writer: OutputWriter) -> Self {
        Self { reader, writer }
    }

    /// Compile `plan` into a single PDF at `output_path`.
    ///
    /// Sources are read sequentially, each opened only for its own
    /// extraction pass and dropped before the next is touched. The cover's
    /// page pull and the first source's regular selection are two
    /// independent pulls; both land in the output, cover first.
    ///
    /// # Errors
    ///
    /// - [`AssemblyError::EmptyPlan`] when the plan selects no pages.
    /// - [`AssemblyError::SourceUnreadable`] when any source fails to load;
    ///   the whole compile aborts.
    /// - [`AssemblyError::PageOutOfBounds`] when a selection references a
    ///   page beyond a document's extent.
    /// - [`AssemblyError::WriteFailed`] when the final write fails.
    pub async fn compile(
        &self,
        plan: &CompilationPlan,
        output_path: &Path,
    ) -> Result<AssemblyReport> {
        let start = Instant::now();

        if plan.is_vacuous() {
            return Err(AssemblyError::EmptyPlan);
        }

        let mut collector = PageCollector::new();
        let mut sources_used = 0;

        let cover_pages = self.collect_cover(plan, &mut collector).await?;

        for source in &plan.sources {
            if self.collect_source(source, plan.missing_selection, &mut collector).await? {
                sources_used += 1;
            }
        }

        if collector.is_empty() {
            return Err(AssemblyError::EmptyPlan);
        }

        let pages_written = collector.page_count();
        let document = collector.finish()?;

        self.writer.save(document, output_path).await?;

        Ok(AssemblyReport {
            pages_written,
            cover_pages,
            sources_used,
            output_path: output_path.to_path_buf(),
            assembly_time: start.elapsed(),
        })
    }

    /// Collect cover material, returning the number of cover pages added.
    async fn collect_cover(
        &self,
        plan: &CompilationPlan,
        collector: &mut PageCollector,
    ) -> Result<usize> {
        let Some(spec) = &plan.cover else {
            return Ok(0);
        };

        let before = collector.page_count();

        if let Some(title) = &spec.title {
            let mut generated = cover::title_page(title)?;
            collector.append_pages(&mut generated, Path::new("<generated cover>"), &[1])?;
        }

        // Cover pages are pulled from the first source, independently of
        // that source's regular selection.
        if !spec.pages.is_empty()
            && let Some(first) = plan.sources.first()
        {
            let mut loaded = self.reader.load(&first.path).await?;
            collector.append_pages(&mut loaded.document, &loaded.path, &spec.pages)?;
        }

        Ok(collector.page_count() - before)
    }

    /// Collect one source's regular selection.
    ///
    /// Returns whether the source contributed any pages.
    async fn collect_source(
        &self,
        source: &PlannedSource,
        policy: MissingSelectionPolicy,
        collector: &mut PageCollector,
    ) -> Result<bool> {
        match &source.selection {
            Some(pages) if pages.is_empty() => Ok(false),
            Some(pages) => {
                let mut loaded = self.reader.load(&source.path).await?;
                collector.append_pages(&mut loaded.document, &loaded.path, pages)?;
                Ok(true)
            }
            None => match policy {
                MissingSelectionPolicy::Exclude => Ok(false),
                MissingSelectionPolicy::AppendAll => {
                    let mut loaded = self.reader.load(&source.path).await?;
                    collector.append_all_pages(&mut loaded.document, &loaded.path)?;
                    Ok(true)
                }
            },
        }
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
