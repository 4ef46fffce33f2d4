//! Build script for mpj.
//!
//! Generates man pages using clap_mangen.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Minimal CLI struct for man page generation.
///
/// This duplicates the CLI definition to avoid build dependency issues.
#[derive(Parser)]
#[command(name = "mpj")]
#[command(
    author,
    version,
    about = "Compile YAML script definitions into package.json scripts"
)]
#[command(
    long_about = "mpj compiles declarative YAML script definitions into the scripts field \
    of a package.json file, writes a documentation side table, and offers an interactive \
    fuzzy picker for running the compiled scripts.\n\n\
    Use 'mpj parse' to preview, 'mpj write' to update package.json in place, and \
    'mpj run' to pick and run a script."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile script files and write a preview manifest
    Parse,
    /// Compile script files and update package.json in place
    Write,
    /// Pick a compiled script interactively and run it
    Run,
}

fn main() {
    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("MPJ_GEN_MANPAGE").is_err() {
        return;
    }

    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return,
    };

    let cmd = <Cli as clap::CommandFactory>::command();
    let man = clap_mangen::Man::new(cmd);

    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to generate man page");

    // Write to the build output directory
    let man_path = out_dir.join("mpj.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    // Also copy to docs directory for distribution
    let docs_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap()).join("docs");
    if docs_dir.exists() {
        let _ = fs::copy(&man_path, docs_dir.join("mpj.1"));
    }

    println!("cargo:rerun-if-changed=build.rs");
}
