//! Build script for cross-run.
//!
//! Generates man pages using clap_mangen.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};

/// Minimal CLI struct for man page generation.
///
/// This duplicates the CLI definition to avoid build dependency issues.
#[derive(Parser)]
#[command(name = "cross-run")]
#[command(
    author,
    version,
    about = "Run commands the same way on every platform"
)]
#[command(
    long_about = "cross-run runs commands with inline environment assignments and \
    uniform variable expansion on every platform.\n\n\
    Leading NAME=value arguments set environment variables. $NAME, ${NAME} and %NAME% \
    are expanded in every argument. A command of the form npm:<script> runs a \
    package.json script with the detected package manager; globs such as npm:build:* \
    run every matching script. Use --multiple to run each argument as its own command \
    one after another, or --parallel to run them all at once."
)]
struct Cli {
    /// Fail when a referenced variable is not set
    #[arg(short, long)]
    strict: bool,

    /// Treat each argument as a separate command, run one after another
    #[arg(short, long)]
    multiple: bool,

    /// Treat each argument as a separate command, run all at once
    #[arg(short, long)]
    parallel: bool,

    /// Forward output untouched (no labels, no diagnostics)
    #[arg(short, long)]
    raw: bool,

    /// Print each command line before running it
    #[arg(short, long)]
    verbose: bool,

    /// Package manager for npm: commands (npm, yarn or pnpm)
    #[arg(short = 'o', long = "override-pm", value_name = "PM")]
    override_pm: Option<String>,

    /// Show commands without executing
    #[arg(short, long)]
    dry_run: bool,

    /// Load .env, .env.local, .env.<NODE_ENV> and .env.<NODE_ENV>.local
    #[arg(short, long)]
    env: bool,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Print an example config file
    #[arg(long)]
    example_config: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,

    /// Commands to run, optionally preceded by NAME=value assignments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    commands: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CROSS_RUN_GEN_MANPAGE");

    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("CROSS_RUN_GEN_MANPAGE").is_err() {
        return;
    }

    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return,
    };

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);

    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to generate man page");

    let man_path = out_dir.join("cross-run.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    // Also copy to docs directory for distribution
    if let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") {
        let docs_dir = PathBuf::from(manifest_dir).join("docs");
        if docs_dir.exists() {
            let _ = fs::copy(&man_path, docs_dir.join("cross-run.1"));
        }
    }
}
