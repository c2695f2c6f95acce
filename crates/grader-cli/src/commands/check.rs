//! Check command implementation
//!
//! Reports where the markers sit and whether the payload is already in
//! place, without touching the file.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use grader_blocks::{locate, splice};
use grader_fs::io;

use super::{Status, describe_line, print_format_wrong, target_dir};
use crate::error::Result;
use crate::manifest::ResolvedManifest;

/// Run the check command
pub fn run_check(dir: &Path, manifest: &ResolvedManifest, json: bool) -> Result<Status> {
    let target = manifest.target_in(dir);
    let content = io::read_text(&target)?;

    let location = match locate(&content, &manifest.markers) {
        Ok(location) => location,
        Err(e) if e.is_format_error() => {
            if json {
                let report = json!({
                    "target": target.as_str(),
                    "well_formed": false,
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_format_wrong(&target, &[e.to_string()]);
            }
            return Ok(Status::FormatWrong);
        }
        Err(e) => return Err(e.into()),
    };

    let up_to_date = splice(&content, &manifest.markers, &manifest.payload)?
        .map(|s| !s.changed);

    if json {
        let report = json!({
            "target": target.as_str(),
            "well_formed": location.is_well_formed(),
            "before_line": location.before_line,
            "after_line": location.after_line,
            "block_lines": location.block_lines,
            "up_to_date": up_to_date,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if location.is_well_formed() {
        println!("{} {}", "Check".bold(), target.as_str().yellow());
        println!("  {}: {}", "BEFORE marker".dimmed(), describe_line(location.before_line));
        println!("  {}: {}", "AFTER marker".dimmed(), describe_line(location.after_line));
        println!("  {}:   {}", "Block lines".dimmed(), location.block_lines);
        let state = if up_to_date == Some(true) {
            "up to date".green()
        } else {
            "would change".cyan()
        };
        println!("  {}:       {}", "Tests".dimmed(), state);
        println!("{} {}", target_dir(&target).yellow(), "Ready for injection".green().bold());
    } else {
        print_format_wrong(
            &target,
            &[
                format!("BEFORE marker: {}", describe_line(location.before_line)),
                format!("AFTER marker: {}", describe_line(location.after_line)),
            ],
        );
    }

    Ok(if location.is_well_formed() {
        Status::Ok
    } else {
        Status::FormatWrong
    })
}
