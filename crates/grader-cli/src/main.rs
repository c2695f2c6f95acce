//! Autograder test injector CLI
//!
//! Deploys the canonical autograder test block into a student submission.

mod cli;
mod commands;
mod error;
mod manifest;

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::Status;
use error::{CliError, Result};
use manifest::{InjectionManifest, ResolvedManifest};

fn main() {
    match run() {
        Ok(Status::Ok) => {}
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Status> {
    let cli = Cli::parse();

    // Setup tracing if verbose; stderr keeps --json output on stdout clean
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    let (manifest, base_dir) = load_manifest(cli.manifest.as_deref())?;
    let resolved = manifest.resolve(&base_dir)?;

    match (cli.command, cli.dir) {
        (Some(cmd), _) => execute_command(cmd, &manifest, &resolved),
        (None, Some(dir)) => commands::run_inject(&dir, &resolved, false, false),
        (None, None) => {
            // No command provided - show help hint
            println!("{} Autograder test injector", "grader".green().bold());
            println!();
            println!("Run {} for available commands.", "grader --help".cyan());
            Ok(Status::Ok)
        }
    }
}

/// Load the manifest named on the command line, or fall back to the
/// built-in one. Also returns the directory relative payload files resolve
/// against.
fn load_manifest(path: Option<&Path>) -> Result<(InjectionManifest, PathBuf)> {
    match path {
        Some(path) => {
            let manifest = InjectionManifest::load(path)?;
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            Ok((manifest, base_dir))
        }
        None => Ok((InjectionManifest::default(), std::env::current_dir()?)),
    }
}

fn execute_command(cmd: Commands, manifest: &InjectionManifest, resolved: &ResolvedManifest) -> Result<Status> {
    match cmd {
        Commands::Inject { dir, dry_run, json } => commands::run_inject(&dir, resolved, dry_run, json),
        Commands::Check { dir, json } => commands::run_check(&dir, resolved, json),
        Commands::Diff { dir } => commands::run_diff(&dir, resolved),
        Commands::Manifest { output, force } => {
            commands::run_manifest(&output, manifest, resolved, force)
        }
    }
}
