//! pagebind - assemble a new PDF from selected pages of multiple sources.
//!
//! This library parses human-entered page selections and merges the
//! selected pages of multiple PDF documents - optionally prefixed by a
//! cover - into one output document. It supports:
//!
//! - Page-selection specs with ranges (`"1,3,5-7"`), validated per document
//! - Per-document or shared selections over an ordered source list
//! - Cover pages: a generated title page, pages extracted from the first
//!   source, or both
//! - Atomic single-shot output writing
//! - Structured, non-swallowing error reporting
//!
//! # Examples
//!
//! ## Basic compile
//!
//! ```no_run
//! use pagebind::assemble::Assembler;
//! use pagebind::plan::{CompilationPlan, PlannedSource};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let plan = CompilationPlan::new(vec![
//!     PlannedSource::selected("a.pdf", vec![1, 3]),
//!     PlannedSource::selected("b.pdf", vec![2, 4]),
//! ]);
//!
//! let report = Assembler::new().compile(&plan, Path::new("out.pdf")).await?;
//! println!("Wrote {} pages", report.pages_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolving selections through a session
//!
//! ```no_run
//! use pagebind::info::get_pdf_info;
//! use pagebind::plan::MissingSelectionPolicy;
//! use pagebind::session::Session;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! let info = get_pdf_info(Path::new("a.pdf")).await?;
//! let id = session.add("a.pdf", info.num_pages);
//! session.set_selection(id, "1,3,5-7")?;
//!
//! let plan = session.to_plan(None, MissingSelectionPolicy::Exclude);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod error;
pub mod info;
pub mod io;
pub mod naming;
pub mod output;
pub mod plan;
pub mod preset;
pub mod select;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use assemble::{Assembler, AssemblyReport};
pub use error::{AssemblyError, InfoError, ParseError, Result, SessionError};
pub use plan::{CompilationPlan, CoverSpec, MissingSelectionPolicy, PlannedSource};
pub use session::Session;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
