//! Compilation planning.
//!
//! This module defines the fully resolved, validated input to assembly:
//! an ordered list of source documents with their page selections, an
//! optional cover, and the policy for sources that carry no selection.
//! A plan is built fresh per compile invocation and never persisted;
//! presets store the raw strings needed to rebuild one (see
//! [`crate::preset`]).

use std::path::PathBuf;

/// Policy for a source present in the input list but carrying no selection.
///
/// The two behaviors are mutually exclusive per deployment and must be
/// chosen explicitly; there is no silent fallback between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSelectionPolicy {
    /// Absence means exclusion: the source contributes no pages (default).
    #[default]
    Exclude,
    /// Legacy whole-file mode: the source is appended in full.
    AppendAll,
}

/// Optional cover material prepended to the output.
///
/// Both parts are optional and independent:
/// - `title` produces a generated one-page cover with a fixed, centered
///   title layout (cosmetic; no correctness constraint beyond rendering
///   without error).
/// - `pages` are extracted from the *first* source document, in addition
///   to - not instead of - that document's regular selection.
///
/// An empty resolved `pages` list is a no-op cover, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverSpec {
    /// Title for a generated cover page, if any.
    pub title: Option<String>,

    /// Resolved 1-based pages to pull from the first source, cover-first.
    pub pages: Vec<u32>,
}

impl CoverSpec {
    /// Create a cover with only a generated title page.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            pages: Vec::new(),
        }
    }

    /// Check whether this cover contributes nothing to the output.
    pub fn is_noop(&self) -> bool {
        self.title.is_none() && self.pages.is_empty()
    }
}

/// One source document in assembly order, with its resolved selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSource {
    /// Path to the source PDF.
    pub path: PathBuf,

    /// Ascending, de-duplicated 1-based page numbers to include.
    ///
    /// `None` means the caller supplied no selection for this source;
    /// what happens then is decided by [`MissingSelectionPolicy`].
    pub selection: Option<Vec<u32>>,
}

impl PlannedSource {
    /// Create a source with an explicit selection.
    pub fn selected(path: impl Into<PathBuf>, pages: Vec<u32>) -> Self {
        Self {
            path: path.into(),
            selection: Some(pages),
        }
    }

    /// Create a source without a selection entry.
    pub fn unselected(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            selection: None,
        }
    }
}

/// The resolved, validated combination of sources, selections, and cover.
///
/// The sole input to [`crate::assemble::Assembler::compile`].
#[derive(Debug, Clone, Default)]
pub struct CompilationPlan {
    /// Source documents in assembly order.
    pub sources: Vec<PlannedSource>,

    /// Optional cover material, interpreted against the first source.
    pub cover: Option<CoverSpec>,

    /// Policy for sources without a selection entry.
    pub missing_selection: MissingSelectionPolicy,
}

impl CompilationPlan {
    /// Create a plan over the given sources with default policies.
    pub fn new(sources: Vec<PlannedSource>) -> Self {
        Self {
            sources,
            cover: None,
            missing_selection: MissingSelectionPolicy::default(),
        }
    }

    /// Attach a cover to this plan.
    pub fn with_cover(mut self, cover: CoverSpec) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Set the policy for sources without a selection entry.
    pub fn with_missing_selection(mut self, policy: MissingSelectionPolicy) -> Self {
        self.missing_selection = policy;
        self
    }

    /// Check whether this plan can possibly produce any pages.
    ///
    /// A plan is vacuous when no source has a non-empty selection, no source
    /// falls under [`MissingSelectionPolicy::AppendAll`], and the cover is
    /// absent or a no-op. The assembler rejects vacuous plans with
    /// [`crate::error::AssemblyError::EmptyPlan`].
    pub fn is_vacuous(&self) -> bool {
        let cover_noop = self.cover.as_ref().is_none_or(CoverSpec::is_noop);

        let sources_empty = self.sources.iter().all(|src| match &src.selection {
            Some(pages) => pages.is_empty(),
            None => self.missing_selection == MissingSelectionPolicy::Exclude,
        });

        cover_noop && sources_empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_noop() {
        assert!(CoverSpec::default().is_noop());
        assert!(!CoverSpec::titled("Compiled PDF").is_noop());
        assert!(
            !CoverSpec {
                title: None,
                pages: vec![1],
            }
            .is_noop()
        );
    }

    #[test]
    fn test_empty_plan_is_vacuous() {
        assert!(CompilationPlan::new(vec![]).is_vacuous());
    }

    #[test]
    fn test_plan_with_selection_is_not_vacuous() {
        let plan = CompilationPlan::new(vec![PlannedSource::selected("a.pdf", vec![1])]);
        assert!(!plan.is_vacuous());
    }

    #[test]
    fn test_unselected_source_depends_on_policy() {
        let sources = vec![PlannedSource::unselected("a.pdf")];

        let plan = CompilationPlan::new(sources.clone());
        assert!(plan.is_vacuous());

        let plan = CompilationPlan::new(sources)
            .with_missing_selection(MissingSelectionPolicy::AppendAll);
        assert!(!plan.is_vacuous());
    }

    #[test]
    fn test_cover_alone_is_not_vacuous() {
        let plan = CompilationPlan::new(vec![PlannedSource::selected("a.pdf", vec![])])
            .with_cover(CoverSpec::titled("Compiled PDF"));
        assert!(!plan.is_vacuous());
    }
}
