//! Caller-owned workspace of source documents.
//!
//! A [`Session`] is an owned, ordered sequence of source-document handles
//! addressed by stable logical id. Front-ends (GUI lists, HTTP handlers)
//! keep one per user interaction instead of sharing process-wide state;
//! the core holds no global mutable state of its own.
//!
//! Reordering goes through [`Session::move_doc`] with an id, never a raw
//! list index, so a concurrent selection lookup can never be invalidated
//! by a move.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ParseError, SessionError};
use crate::plan::{CompilationPlan, CoverSpec, MissingSelectionPolicy, PlannedSource};
use crate::select;

/// Stable logical identifier of a source document within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(u64);

/// Direction for reordering a document within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the front of the assembly order.
    Up,
    /// Toward the back of the assembly order.
    Down,
}

/// One registered source document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path to the PDF.
    pub path: PathBuf,

    /// Page count, captured when the document was registered.
    pub page_count: u32,
}

/// An ordered workspace of source documents and their selections.
#[derive(Debug, Default)]
pub struct Session {
    next_id: u64,
    order: Vec<DocId>,
    documents: HashMap<DocId, SourceDocument>,
    selections: HashMap<DocId, Vec<u32>>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source document at the end of the assembly order.
    ///
    /// `page_count` is the count captured by the caller's metadata query
    /// (see [`crate::info::get_pdf_info`]); selections parsed through this
    /// session are bounded by it.
    pub fn add(&mut self, path: impl Into<PathBuf>, page_count: u32) -> DocId {
        let id = DocId(self.next_id);
        self.next_id += 1;

        self.documents.insert(
            id,
            SourceDocument {
                path: path.into(),
                page_count,
            },
        );
        self.order.push(id);
        id
    }

    /// Remove a document, dropping its selection.
    ///
    /// Returns the removed document, or `None` for an unknown id.
    pub fn remove(&mut self, id: DocId) -> Option<SourceDocument> {
        self.order.retain(|&other| other != id);
        self.selections.remove(&id);
        self.documents.remove(&id)
    }

    /// Move a document one position up or down in the assembly order.
    ///
    /// A move past either end is a no-op. Returns the new order.
    pub fn move_doc(&mut self, id: DocId, direction: Direction) -> &[DocId] {
        if let Some(pos) = self.order.iter().position(|&other| other == id) {
            match direction {
                Direction::Up if pos > 0 => self.order.swap(pos, pos - 1),
                Direction::Down if pos + 1 < self.order.len() => self.order.swap(pos, pos + 1),
                _ => {}
            }
        }
        &self.order
    }

    /// Parse and store a selection spec for one document.
    ///
    /// The spec is resolved against the document's page count; out-of-range
    /// values filter silently per the parser contract. An empty resolution
    /// is stored as an (explicitly) empty selection.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownDocument`] for a stale or foreign handle;
    /// [`SessionError::Parse`] for a malformed spec.
    pub fn set_selection(&mut self, id: DocId, spec: &str) -> Result<&[u32], SessionError> {
        let doc = self
            .documents
            .get(&id)
            .ok_or(SessionError::UnknownDocument)?;

        let pages = select::parse(spec, doc.page_count)?;
        let stored = self.selections.entry(id).or_default();
        *stored = pages;
        Ok(stored)
    }

    /// Drop the selection for one document, if any.
    pub fn clear_selection(&mut self, id: DocId) {
        self.selections.remove(&id);
    }

    /// Current assembly order.
    pub fn order(&self) -> &[DocId] {
        &self.order
    }

    /// Look up a registered document.
    pub fn document(&self, id: DocId) -> Option<&SourceDocument> {
        self.documents.get(&id)
    }

    /// Look up the stored selection for a document.
    pub fn selection(&self, id: DocId) -> Option<&[u32]> {
        self.selections.get(&id).map(Vec::as_slice)
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the session holds no documents.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Path of the first document in assembly order, if any.
    ///
    /// Cover-page specs are interpreted against this document.
    pub fn first_path(&self) -> Option<&Path> {
        self.order
            .first()
            .and_then(|id| self.documents.get(id))
            .map(|doc| doc.path.as_path())
    }

    /// Parse a cover spec string against the first document.
    ///
    /// # Errors
    ///
    /// Propagates [`ParseError`] for malformed specs. An empty resolution
    /// is valid (a no-op cover).
    pub fn resolve_cover_pages(&self, spec: &str) -> Result<Vec<u32>, ParseError> {
        let max_pages = self
            .order
            .first()
            .and_then(|id| self.documents.get(id))
            .map(|doc| doc.page_count)
            .unwrap_or(0);

        select::parse(spec, max_pages)
    }

    /// Build a fresh [`CompilationPlan`] from the session's current state.
    ///
    /// Documents keep their assembly order; documents without a stored
    /// selection become unselected sources governed by `policy`.
    pub fn to_plan(
        &self,
        cover: Option<CoverSpec>,
        policy: MissingSelectionPolicy,
    ) -> CompilationPlan {
        let sources = self
            .order
            .iter()
            .map(|id| PlannedSource {
                path: self.documents[id].path.clone(),
                selection: self.selections.get(id).cloned(),
            })
            .collect();

        let mut plan = CompilationPlan::new(sources).with_missing_selection(policy);
        if let Some(cover) = cover {
            plan = plan.with_cover(cover);
        }
        plan
    }
}
