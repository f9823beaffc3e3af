//! CLI argument parsing for pagebind.
//!
//! Defines the command-line interface structure using `clap`. Subcommands
//! map onto the library's three surfaces: metadata queries, compiles, and
//! persisted presets.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Assemble a new PDF from selected pages of multiple source documents.
///
/// pagebind interprets page-selection specs like "1,3,5-7" per source
/// document, optionally prepends a cover (a generated title page and/or
/// pages extracted from the first source), and writes one output PDF.
#[derive(Parser, Debug)]
#[command(name = "pagebind")]
#[command(version)]
#[command(about = "Assemble a PDF from selected pages of multiple sources", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show metadata (page count, size, timestamps) for PDF files
    Info {
        /// PDF files or glob patterns to inspect
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,

        /// Emit metadata as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compile selected pages of the given sources into one PDF
    Compile(CompileArgs),

    /// Save or re-run persisted compile presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

/// Arguments shared by `compile` and `preset save`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Input PDF files in assembly order (glob patterns allowed)
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// Required unless --auto-name is given.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Page selection spec, e.g. "1,3,5-7"
    ///
    /// Give the flag once to share one spec across all inputs (each file
    /// keeps the part of the selection it can satisfy), or once per input
    /// for per-file selections.
    #[arg(short, long, value_name = "SPEC")]
    pub pages: Vec<String>,

    /// Prepend a generated cover page with this centered title
    #[arg(long, value_name = "TITLE")]
    pub cover_title: Option<String>,

    /// Also pull these pages of the first input as cover material
    ///
    /// Cover pages land before everything else and are independent of the
    /// first input's regular selection; both are included.
    #[arg(long, value_name = "SPEC")]
    pub cover_pages: Option<String>,

    /// Append inputs without a selection in full (legacy whole-file mode)
    ///
    /// By default such inputs contribute no pages.
    #[arg(long)]
    pub append_unselected: bool,

    /// Auto-generate a randomized output filename in the current directory
    #[arg(long, conflicts_with = "output")]
    pub auto_name: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    /// Save a compile configuration as a named preset file
    Save {
        /// Preset name
        #[arg(value_name = "NAME")]
        name: String,

        /// Where to write the preset JSON
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        args: CompileArgs,
    },

    /// Re-run a compile from a preset file
    Run {
        /// Preset JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output PDF file path (defaults to an auto-generated name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Suppress all non-error output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the contents of a preset file
    List {
        /// Preset JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compile() {
        let cli = Cli::parse_from([
            "pagebind", "compile", "a.pdf", "b.pdf", "-o", "out.pdf", "-p", "1-3", "-p", "2",
        ]);

        match cli.command {
            Command::Compile(args) => {
                assert_eq!(args.inputs, vec!["a.pdf", "b.pdf"]);
                assert_eq!(args.pages, vec!["1-3", "2"]);
                assert_eq!(args.output, Some(PathBuf::from("out.pdf")));
            }
            _ => panic!("expected compile command"),
        }
    }

    #[test]
    fn test_parse_preset_list() {
        let cli = Cli::parse_from(["pagebind", "preset", "list", "weekly.json"]);

        match cli.command {
            Command::Preset {
                action: PresetAction::List { file },
            } => assert_eq!(file, PathBuf::from("weekly.json")),
            _ => panic!("expected preset list command"),
        }
    }

    #[test]
    fn test_auto_name_conflicts_with_output() {
        let result = Cli::try_parse_from([
            "pagebind",
            "compile",
            "a.pdf",
            "-o",
            "out.pdf",
            "--auto-name",
        ]);
        assert!(result.is_err());
    }
}
