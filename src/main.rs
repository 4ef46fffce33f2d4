//! mpj - Manage Package.json scripts
//!
//! Entry point for the mpj CLI application.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use mpj::cli::{start_dir, Cli, Command, CompileArgs, RunArgs};
use mpj::compile::{
    compile_dir, render_docs, render_scripts_manifest, CompileOptions, DocEntry,
};
use mpj::config::{load_config, Config};
use mpj::definition::Strictness;
use mpj::error::{exit_code, MpjError};
use mpj::manifest::Manifest;
use mpj::picker::{build_entries, pick_script};
use mpj::runner::{detect_runner_reason, execute_script};
use mpj::utils::{docs_file, find_project_root, preview_file, scripts_dir};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Check if it's one of our custom errors with good formatting
            if let Some(mpj_err) = err.downcast_ref::<MpjError>() {
                eprintln!("Error: {mpj_err}");
                return ExitCode::from(mpj_err.exit_code() as u8);
            }
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code::GENERAL_ERROR as u8)
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    // Handle shell completions early
    if let Some(shell) = cli.completions {
        Cli::generate_completions(shell);
        return Ok(exit_code::SUCCESS);
    }

    match &cli.command {
        Some(Command::Parse(args)) => compile_project(&cli, args, WriteTarget::Preview),
        Some(Command::Write(args)) => compile_project(&cli, args, WriteTarget::Manifest),
        Some(Command::Run(args)) => run_interactive(&cli, args),
        // Absent or unrecognized subcommand: usage text, clean exit.
        None | Some(Command::External(_)) => {
            Cli::print_usage();
            Ok(exit_code::SUCCESS)
        }
    }
}

/// Where the compiled scripts mapping is written.
enum WriteTarget {
    /// Side-by-side `package-preview.json`.
    Preview,
    /// The real package.json `scripts` field.
    Manifest,
}

fn load_effective_config(cli: &Cli, project_dir: &Path) -> Config {
    if cli.no_config {
        Config::default()
    } else {
        load_config(cli.config.as_deref(), project_dir).unwrap_or_default()
    }
}

fn compile_project(cli: &Cli, args: &CompileArgs, target: WriteTarget) -> Result<i32> {
    let project_dir = find_project_root(&start_dir(args.path.as_ref()))
        .context("Failed to find project directory")?;
    let config = load_effective_config(cli, &project_dir);
    let manifest = Manifest::load(&project_dir)?;

    let strictness = if args.lenient {
        Strictness::Lenient
    } else {
        config.strictness()
    };
    let options = CompileOptions {
        strictness,
        audit: args.audit || config.audit(),
    };

    let dir = scripts_dir(&project_dir, config.compile.scripts_dir.as_deref());

    if cli.debug {
        eprintln!("Debug: Project directory = {}", project_dir.display());
        eprintln!("Debug: Scripts directory = {}", dir.display());
        eprintln!("Debug: Options = {options:?}");
    }

    let installed = manifest.installed_packages();
    let compilation = compile_dir(&dir, &installed, &options)?;

    if cli.debug {
        eprintln!(
            "Debug: Compiled {} scripts from {} files",
            compilation.book.len(),
            compilation.file_count
        );
    }

    for diag in &compilation.skipped {
        eprintln!("Warning: {diag}");
    }

    if !compilation.is_clean() {
        eprintln!("\x1b[31m\nScript validation errors:\x1b[0m");
        for err in &compilation.errors {
            eprintln!("\x1b[31m- {err}\x1b[0m");
        }
        eprintln!();
        // Output is still written below; the exit code reports the errors.
    }

    let docs_path = docs_file(&project_dir);
    if let Some(parent) = docs_path.parent() {
        fs::create_dir_all(parent)
            .map_err(MpjError::io_context("create directory", parent.to_path_buf()))?;
    }
    fs::write(&docs_path, render_docs(compilation.book.docs()))
        .map_err(MpjError::io_context("write", docs_path.clone()))?;

    match target {
        WriteTarget::Preview => {
            let path = preview_file(&project_dir);
            fs::write(&path, render_scripts_manifest(compilation.book.scripts()))
                .map_err(MpjError::io_context("write", path.clone()))?;
            println!("Generated {}", path.display());
        }
        WriteTarget::Manifest => {
            fs::write(
                manifest.path(),
                manifest.render_with_scripts(compilation.book.scripts()),
            )
            .map_err(MpjError::io_context("write", manifest.path().to_path_buf()))?;
            println!("Updated package.json with new scripts");
        }
    }
    println!(
        "Compiled {} scripts from {} files; docs table at {}",
        compilation.book.len(),
        compilation.file_count,
        docs_path.display()
    );

    if compilation.is_clean() {
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::VALIDATION_FAILED)
    }
}

fn run_interactive(cli: &Cli, args: &RunArgs) -> Result<i32> {
    let project_dir = find_project_root(&start_dir(args.path.as_ref()))
        .context("Failed to find project directory")?;
    let config = load_effective_config(cli, &project_dir);
    let manifest = Manifest::load(&project_dir)?;

    let docs = load_docs_table(&project_dir)?;
    let scripts = load_scripts_table(&project_dir, &manifest)?;

    if scripts.is_empty() {
        return Err(MpjError::NoCompiledScripts {
            path: preview_file(&project_dir),
        }
        .into());
    }

    let entries = build_entries(&scripts, &docs);
    let Some(chosen) = pick_script(entries)? else {
        return Ok(exit_code::SUCCESS);
    };

    let (runner, reason) = match args.runner.map(Into::into).or(config.run.runner) {
        Some(runner) => (runner, "override".to_string()),
        None => detect_runner_reason(&project_dir, &manifest),
    };

    if cli.debug {
        eprintln!("Debug: Package manager = {runner} ({reason})");
    }

    println!("Running: {}", runner.format_command(&chosen));
    let result = execute_script(runner, &chosen, &project_dir)?;
    Ok(result.code())
}

/// Load the last-written docs table.
fn load_docs_table(project_dir: &Path) -> Result<IndexMap<String, DocEntry>> {
    let path = docs_file(project_dir);
    if !path.exists() {
        return Err(MpjError::NoCompiledScripts { path }.into());
    }

    let content =
        fs::read_to_string(&path).map_err(MpjError::io_context("read", path.clone()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse docs table at {}", path.display()))
}

/// Load the last-written scripts mapping: the preview file when present,
/// else the manifest's scripts field.
fn load_scripts_table(
    project_dir: &Path,
    manifest: &Manifest,
) -> Result<IndexMap<String, String>> {
    let preview = preview_file(project_dir);
    if !preview.exists() {
        return Ok(manifest.scripts());
    }

    let content =
        fs::read_to_string(&preview).map_err(MpjError::io_context("read", preview.clone()))?;
    let envelope: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", preview.display()))?;

    let mut scripts = IndexMap::new();
    if let Some(obj) = envelope.get("scripts").and_then(|v| v.as_object()) {
        for (name, value) in obj {
            if let Some(line) = value.as_str() {
                scripts.insert(name.clone(), line.to_string());
            }
        }
    }
    Ok(scripts)
}
