//! Diff command implementation
//!
//! Previews the change injection would make as a unified diff.

use std::path::Path;

use colored::Colorize;
use similar::TextDiff;

use grader_blocks::splice;
use grader_fs::io;

use super::{Status, print_format_wrong};
use crate::error::Result;
use crate::manifest::ResolvedManifest;

/// Run the diff command
pub fn run_diff(dir: &Path, manifest: &ResolvedManifest) -> Result<Status> {
    let target = manifest.target_in(dir);
    let content = io::read_text(&target)?;

    let spliced = match splice(&content, &manifest.markers, &manifest.payload) {
        Ok(Some(spliced)) => spliced,
        Ok(None) => {
            print_format_wrong(&target, &["markers missing; nothing to diff".to_string()]);
            return Ok(Status::FormatWrong);
        }
        Err(e) if e.is_format_error() => {
            print_format_wrong(&target, &[e.to_string()]);
            return Ok(Status::FormatWrong);
        }
        Err(e) => return Err(e.into()),
    };

    if !spliced.changed {
        println!("{} No changes needed. Test code is up to date.", "OK".green().bold());
        return Ok(Status::Ok);
    }

    let rendered = render_unified(target.as_str(), &content, &spliced.content);
    for line in rendered.lines() {
        println!("{}", colorize(line));
    }

    Ok(Status::Ok)
}

/// Plain unified diff between the current and injected content.
fn render_unified(name: &str, old: &str, new: &str) -> String {
    let old_header = format!("a/{}", name);
    let new_header = format!("b/{}", name);
    let diff = TextDiff::from_lines(old, new);
    let mut unified = diff.unified_diff();
    unified.context_radius(3).header(&old_header, &new_header);
    unified.to_string()
}

fn colorize(line: &str) -> colored::ColoredString {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else if line.starts_with("@@") {
        line.cyan()
    } else {
        line.normal()
    }
}
