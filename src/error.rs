//! Error types for pagebind.
//!
//! This module defines all error types that can occur while parsing page
//! selections, querying document metadata, or assembling an output PDF.
//! Errors are structured values identifying cause and offending input;
//! nothing is swallowed and no partial/best-effort compile is produced.
//!
//! # Error Categories
//!
//! - [`ParseError`]: malformed page-selection specs
//! - [`SessionError`]: stale document handles or failed selection specs
//! - [`InfoError`]: documents whose metadata cannot be read
//! - [`AssemblyError`]: failures while extracting pages or writing output

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Error produced while parsing a page-selection spec string.
///
/// Malformed tokens are hard errors; out-of-range page numbers are not
/// (they are silently filtered by the parser, see [`crate::select::parse`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token could not be parsed as an integer literal or range.
    InvalidToken {
        /// The literal offending substring, trimmed.
        token: String,
    },

    /// A `start-end` range where `start > end`.
    InvalidRange {
        /// Range start as written.
        start: u32,
        /// Range end as written.
        end: u32,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { token } => {
                write!(f, "Invalid page selection token: '{token}'")
            }
            Self::InvalidRange { start, end } => {
                write!(
                    f,
                    "Invalid page range {start}-{end}: start must be less than or equal to end"
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Error produced by session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The document handle does not refer to a registered document.
    UnknownDocument,

    /// The selection spec failed to parse.
    Parse(ParseError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDocument => {
                write!(f, "Unknown document handle: the document was never added or has been removed")
            }
            Self::Parse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::UnknownDocument => None,
        }
    }
}

impl From<ParseError> for SessionError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

/// Error produced by the document metadata query.
#[derive(Debug)]
pub enum InfoError {
    /// The document cannot be opened or its page count cannot be determined.
    Unreadable {
        /// Path to the unreadable document.
        path: PathBuf,
        /// Details from the underlying loader.
        details: String,
    },
}

impl InfoError {
    /// Create an Unreadable error.
    pub fn unreadable(path: PathBuf, details: impl Into<String>) -> Self {
        Self::Unreadable {
            path,
            details: details.into(),
        }
    }
}

impl fmt::Display for InfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, details } => {
                write!(
                    f,
                    "Cannot read PDF: {}\n  Details: {}",
                    path.display(),
                    details
                )
            }
        }
    }
}

impl std::error::Error for InfoError {}

/// Main error type for document assembly.
#[derive(Debug)]
pub enum AssemblyError {
    /// A source document is unreadable at extraction time.
    SourceUnreadable {
        /// Path to the source document.
        path: PathBuf,
        /// Details from the underlying loader.
        details: String,
    },

    /// A selection references a page beyond the document's current extent.
    ///
    /// Should not occur when the parser's contract was honored against the
    /// same file; indicates a stale selection against a changed file.
    PageOutOfBounds {
        /// Path to the source document.
        path: PathBuf,
        /// The 1-based page number that was requested.
        page: u32,
    },

    /// The output artifact could not be written.
    WriteFailed {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        cause: io::Error,
    },

    /// The plan resolves to no pages at all.
    EmptyPlan,

    /// The internal object graph could not be manipulated.
    MalformedDocument {
        /// Path to the source document, when known.
        path: PathBuf,
        /// Details about the structural problem.
        details: String,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnreadable { path, details } => {
                write!(
                    f,
                    "Cannot read source PDF: {}\n  Details: {}",
                    path.display(),
                    details
                )
            }
            Self::PageOutOfBounds { path, page } => {
                write!(
                    f,
                    "Page {page} is out of bounds for PDF: {}\n  \
                     Hint: the file may have changed since pages were selected",
                    path.display()
                )
            }
            Self::WriteFailed { path, cause } => {
                write!(
                    f,
                    "Failed to write output PDF: {}\n  Reason: {}",
                    path.display(),
                    cause
                )
            }
            Self::EmptyPlan => {
                write!(f, "Nothing to compile: the plan selects no pages")
            }
            Self::MalformedDocument { path, details } => {
                write!(
                    f,
                    "Malformed PDF structure in: {}\n  Details: {}",
                    path.display(),
                    details
                )
            }
        }
    }
}

impl std::error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WriteFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl AssemblyError {
    /// Create a SourceUnreadable error.
    pub fn source_unreadable(path: PathBuf, details: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            path,
            details: details.into(),
        }
    }

    /// Create a PageOutOfBounds error.
    pub fn page_out_of_bounds(path: PathBuf, page: u32) -> Self {
        Self::PageOutOfBounds { path, page }
    }

    /// Create a WriteFailed error.
    pub fn write_failed(path: PathBuf, cause: io::Error) -> Self {
        Self::WriteFailed { path, cause }
    }

    /// Create a MalformedDocument error.
    pub fn malformed(path: PathBuf, details: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path,
            details: details.into(),
        }
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceUnreadable { .. } => 2,
            Self::PageOutOfBounds { .. } => 3,
            Self::WriteFailed { .. } => 5,
            Self::EmptyPlan => 1,
            Self::MalformedDocument { .. } => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_token_display() {
        let err = ParseError::InvalidToken {
            token: "abc".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Invalid page selection token"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_invalid_range_display() {
        let err = ParseError::InvalidRange { start: 5, end: 3 };
        let msg = format!("{err}");
        assert!(msg.contains("5-3"));
        assert!(msg.contains("start must be less"));
    }

    #[test]
    fn test_session_error_display_and_source() {
        let err = SessionError::UnknownDocument;
        assert!(format!("{err}").contains("Unknown document handle"));
        assert!(err.source().is_none());

        let err = SessionError::from(ParseError::InvalidToken {
            token: "x".to_string(),
        });
        assert!(format!("{err}").contains("Invalid page selection token"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_info_unreadable_display() {
        let err = InfoError::unreadable(PathBuf::from("/tmp/missing.pdf"), "no such file");
        let msg = format!("{err}");
        assert!(msg.contains("Cannot read PDF"));
        assert!(msg.contains("missing.pdf"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_page_out_of_bounds_display() {
        let err = AssemblyError::page_out_of_bounds(PathBuf::from("doc.pdf"), 12);
        let msg = format!("{err}");
        assert!(msg.contains("Page 12"));
        assert!(msg.contains("doc.pdf"));
    }

    #[test]
    fn test_write_failed_has_source() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = AssemblyError::write_failed(PathBuf::from("out.pdf"), io_err);
        assert!(err.source().is_some());

        let err = AssemblyError::EmptyPlan;
        assert!(err.source().is_none());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            AssemblyError::source_unreadable(PathBuf::from("x"), "e").exit_code(),
            2
        );
        assert_eq!(
            AssemblyError::page_out_of_bounds(PathBuf::from("x"), 1).exit_code(),
            3
        );
        assert_eq!(AssemblyError::EmptyPlan.exit_code(), 1);
    }
}
