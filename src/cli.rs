//! CLI argument definitions for mpj.
//!
//! Uses clap with derive macros for argument parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::runner::Runner;

/// Compile YAML script definitions into package.json scripts.
#[derive(Parser, Debug)]
#[command(name = "mpj")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = false)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile script files and write a preview manifest
    Parse(CompileArgs),

    /// Compile script files and update package.json in place
    Write(CompileArgs),

    /// Pick a compiled script interactively and run it
    Run(RunArgs),

    /// Anything else prints usage and exits cleanly
    #[command(external_subcommand)]
    External(Vec<OsString>),
}

/// Arguments shared by the compile subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct CompileArgs {
    /// Path to project directory (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Skip structurally incomplete definitions instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Audit command tokens against installed dependencies
    #[arg(long)]
    pub audit: bool,
}

/// Arguments for the run subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to project directory (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Override package manager
    #[arg(short, long, value_name = "RUNNER", value_enum)]
    pub runner: Option<CliRunner>,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

/// Package manager for CLI parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliRunner {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl From<CliRunner> for Runner {
    fn from(runner: CliRunner) -> Self {
        match runner {
            CliRunner::Npm => Runner::Npm,
            CliRunner::Yarn => Runner::Yarn,
            CliRunner::Pnpm => Runner::Pnpm,
            CliRunner::Bun => Runner::Bun,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Print usage text to stdout.
    pub fn print_usage() {
        let mut cmd = Cli::command();
        let _ = cmd.print_help();
    }

    /// Generate shell completions and write to stdout.
    pub fn generate_completions(shell: CliShell) {
        let mut cmd = Cli::command();
        let shell = match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        };
        generate(shell, &mut cmd, "mpj", &mut std::io::stdout());
    }
}

/// Resolve a project directory argument to a concrete start path.
pub fn start_dir(path: Option<&PathBuf>) -> PathBuf {
    path.cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}
