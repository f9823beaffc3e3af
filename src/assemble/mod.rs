//! Document assembly.
//!
//! Turns a [`crate::plan::CompilationPlan`] into one output PDF:
//! cover material first, then every source's regular selection in caller
//! order, collected in memory and written once.

pub mod assembler;
pub mod cover;
pub mod pages;

pub use assembler::{Assembler, AssemblyReport};
pub use pages::PageCollector;

#[cfg(test)]
pub(crate) mod testutil;
