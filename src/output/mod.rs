//! User-facing console output.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};
