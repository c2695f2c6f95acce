//! Manifest command implementation

use std::path::Path;

use colored::Colorize;
use grader_fs::{ConfigStore, NormalizedPath};

use super::Status;
use crate::error::{CliError, Result};
use crate::manifest::{InjectionManifest, ResolvedManifest};

/// Run the manifest command
///
/// Writes `manifest` with its resolved payload inlined, so the output is
/// self-contained.
pub fn run_manifest(
    output: &Path,
    manifest: &InjectionManifest,
    resolved: &ResolvedManifest,
    force: bool,
) -> Result<Status> {
    let path = NormalizedPath::verbatim(output);
    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path
        )));
    }

    let inlined = manifest.clone().with_inline_payload(&resolved.payload);
    ConfigStore::new().save(&path, &inlined)?;

    println!("{} Wrote manifest to {}", "OK".green().bold(), path.as_str().cyan());
    Ok(Status::Ok)
}
