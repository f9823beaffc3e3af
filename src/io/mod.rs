//! Source reading and output writing.

pub mod reader;
pub mod writer;

pub use reader::{LoadedSource, SourceReader};
pub use writer::{OutputWriter, WriteOptions};
