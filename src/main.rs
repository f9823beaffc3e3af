mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use pagebind::assemble::Assembler;
use pagebind::info::{self, PdfInfo};
use pagebind::naming;
use pagebind::output::OutputFormatter;
use pagebind::plan::{CompilationPlan, CoverSpec, MissingSelectionPolicy};
use pagebind::preset::{Preset, PresetSource};
use pagebind::session::Session;
use pagebind::utils;

use cli::{Cli, Command, CompileArgs, PresetAction};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Info { files, json } => run_info(&files, json).await,
        Command::Compile(args) => run_compile(&args).await,
        Command::Preset { action } => match action {
            PresetAction::Save { name, file, args } => save_preset(name, &file, &args),
            PresetAction::Run {
                file,
                output,
                quiet,
            } => run_preset(&file, output, quiet).await,
            PresetAction::List { file } => list_preset(&file),
        },
    }
}

/// Print metadata for each matched file.
async fn run_info(patterns: &[String], json: bool) -> Result<()> {
    let paths = utils::collect_paths_for_patterns(patterns)?;
    if paths.is_empty() {
        bail!("no input files matched");
    }

    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let results = info::info_all(&paths, workers).await;

    let mut failures = 0;
    if json {
        let mut infos = Vec::new();
        for result in results {
            match result {
                Ok(info) => infos.push(info),
                Err(e) => {
                    eprintln!("{e}");
                    failures += 1;
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        for result in results {
            match result {
                Ok(info) => {
                    println!(
                        "{}: {} page(s), {}, modified {}",
                        info.file_name,
                        info.num_pages,
                        info.format_file_size(),
                        PdfInfo::timestamp_label(info.modified),
                    );
                }
                Err(e) => {
                    eprintln!("{e}");
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} file(s) could not be read");
    }
    Ok(())
}

/// Compile the given sources into one output PDF.
async fn run_compile(args: &CompileArgs) -> Result<()> {
    let formatter = OutputFormatter::new(args.quiet, args.verbose);

    let session = build_session(&args.inputs, &args.pages, &formatter).await?;

    let cover = resolve_cover(&session, args.cover_title.as_deref(), args.cover_pages.as_deref())?;

    let policy = if args.append_unselected {
        MissingSelectionPolicy::AppendAll
    } else {
        MissingSelectionPolicy::Exclude
    };

    let output = resolve_output_path(args.output.clone(), args.auto_name)?;
    let plan = session.to_plan(cover, policy);

    compile_plan(&plan, &output, &formatter).await
}

/// Save a compile configuration as a preset file, without compiling.
fn save_preset(name: String, file: &Path, args: &CompileArgs) -> Result<()> {
    let paths = utils::collect_paths_for_patterns(&args.inputs)?;
    if paths.is_empty() {
        bail!("no input files matched");
    }

    let specs = per_source_specs(&args.pages, paths.len())?;

    let sources = paths
        .into_iter()
        .zip(specs)
        .map(|(path, pages)| PresetSource { path, pages })
        .collect();

    let preset = Preset {
        name,
        sources,
        cover_title: args.cover_title.clone(),
        cover_pages: args.cover_pages.clone(),
        append_unselected: args.append_unselected,
    };

    preset.save(file)?;
    println!("Saved preset '{}' to {}", preset.name, file.display());
    Ok(())
}

/// Re-run a compile from a preset file.
async fn run_preset(file: &Path, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let preset = Preset::load(file)?;
    let formatter = OutputFormatter::new(quiet, false);
    formatter.info(&format!("Running preset '{}'", preset.name));

    // Selections are re-resolved against the files' current page counts;
    // the preset stores only the raw spec strings.
    let mut session = Session::new();
    for source in &preset.sources {
        let info = info::get_pdf_info(&source.path).await?;
        let id = session.add(&source.path, info.num_pages);
        if let Some(spec) = &source.pages {
            session.set_selection(id, spec)?;
        }
    }

    let cover = resolve_cover(
        &session,
        preset.cover_title.as_deref(),
        preset.cover_pages.as_deref(),
    )?;

    let policy = if preset.append_unselected {
        MissingSelectionPolicy::AppendAll
    } else {
        MissingSelectionPolicy::Exclude
    };

    let output = resolve_output_path(output, true)?;
    let plan = session.to_plan(cover, policy);

    compile_plan(&plan, &output, &formatter).await
}

/// Print a preset file's contents.
fn list_preset(file: &Path) -> Result<()> {
    let preset = Preset::load(file)?;
    println!("{}", serde_json::to_string_pretty(&preset)?);
    Ok(())
}

/// Register all inputs in a session and apply their selection specs.
async fn build_session(
    inputs: &[String],
    specs: &[String],
    formatter: &OutputFormatter,
) -> Result<Session> {
    let paths = utils::collect_paths_for_patterns(inputs)?;
    if paths.is_empty() {
        bail!("no input files matched");
    }

    let specs = per_source_specs(specs, paths.len())?;

    let mut session = Session::new();
    for (path, spec) in paths.into_iter().zip(specs) {
        let info = info::get_pdf_info(&path)
            .await
            .with_context(|| format!("while adding input: {}", path.display()))?;

        formatter.debug(&format!(
            "{}: {} page(s), {}",
            info.file_name,
            info.num_pages,
            info.format_file_size()
        ));

        let id = session.add(path, info.num_pages);
        if let Some(spec) = spec {
            session.set_selection(id, &spec)?;
        }
    }

    Ok(session)
}

/// Distribute selection specs across sources.
///
/// One spec is shared by every source; otherwise specs pair up with
/// sources one-to-one. No specs means no selections (policy decides).
fn per_source_specs(specs: &[String], source_count: usize) -> Result<Vec<Option<String>>> {
    match specs.len() {
        0 => Ok(vec![None; source_count]),
        1 => Ok(vec![Some(specs[0].clone()); source_count]),
        n if n == source_count => Ok(specs.iter().cloned().map(Some).collect()),
        n => bail!(
            "got {n} --pages specs for {source_count} input file(s); \
             give one shared spec or one per input"
        ),
    }
}

/// Build the cover spec, resolving cover pages against the first source.
fn resolve_cover(
    session: &Session,
    title: Option<&str>,
    pages_spec: Option<&str>,
) -> Result<Option<CoverSpec>> {
    if title.is_none() && pages_spec.is_none() {
        return Ok(None);
    }

    let pages = match pages_spec {
        Some(spec) => session.resolve_cover_pages(spec)?,
        None => Vec::new(),
    };

    Ok(Some(CoverSpec {
        title: title.map(str::to_string),
        pages,
    }))
}

/// Pick the output path: explicit, or an auto-generated name in the cwd.
fn resolve_output_path(output: Option<PathBuf>, auto_name: bool) -> Result<PathBuf> {
    match output {
        Some(path) => Ok(path),
        None if auto_name => Ok(PathBuf::from(naming::generate_filename())),
        None => bail!("specify --output or --auto-name"),
    }
}

/// Run the assembler and report the outcome.
async fn compile_plan(
    plan: &CompilationPlan,
    output: &Path,
    formatter: &OutputFormatter,
) -> Result<()> {
    formatter.info(&format!(
        "Compiling {} source file(s)...",
        plan.sources.len()
    ));

    match Assembler::new().compile(plan, output).await {
        Ok(report) => {
            formatter.debug(&format!(
                "{} cover page(s), {} source(s) contributed, {:.2}s",
                report.cover_pages,
                report.sources_used,
                report.assembly_time.as_secs_f64()
            ));
            formatter.success(&format!(
                "Wrote {} page(s) to {}",
                report.pages_written,
                output.display()
            ));
            Ok(())
        }
        Err(e) => {
            formatter.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
