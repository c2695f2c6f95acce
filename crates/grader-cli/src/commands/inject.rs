//! Inject command implementation

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use grader_blocks::{Error as BlocksError, PatchOptions, PatchOutcome, patch_with_options};
use grader_fs::NormalizedPath;

use super::{Status, print_format_wrong, target_dir};
use crate::error::Result;
use crate::manifest::ResolvedManifest;

/// Run the inject command
///
/// Replaces the block between the markers of `<dir>/<target>` with the
/// manifest payload. Missing or out-of-order markers leave the file alone
/// and yield `Status::FormatWrong`.
pub fn run_inject(dir: &Path, manifest: &ResolvedManifest, dry_run: bool, json: bool) -> Result<Status> {
    let target = manifest.target_in(dir);
    tracing::debug!(target = %target, dry_run, "Injecting test block");

    let options = PatchOptions {
        dry_run,
        ..PatchOptions::default()
    };
    let result = match patch_with_options(&target, &manifest.markers, &manifest.payload, options) {
        Ok(outcome) => Ok(outcome),
        Err(e) if e.is_format_error() => Err(e),
        Err(e) => return Err(e.into()),
    };

    let status = match &result {
        Ok(outcome) if outcome.is_success() => Status::Ok,
        _ => Status::FormatWrong,
    };

    if json {
        print_json(&target, &result, dry_run)?;
    } else {
        print_human(&target, &result, dry_run);
    }

    Ok(status)
}

fn print_human(target: &NormalizedPath, result: &std::result::Result<PatchOutcome, BlocksError>, dry_run: bool) {
    match result {
        Ok(outcome) if outcome.is_success() => {
            let message = if outcome.written {
                "Changed the test code".green().bold()
            } else if dry_run && outcome.checksum_before != outcome.checksum_after {
                "[dry-run] Would change the test code".cyan().bold()
            } else {
                "Test code already up to date".green()
            };
            println!("{} {}", target_dir(target).yellow(), message);
        }
        Ok(outcome) => print_format_wrong(
            target,
            &[
                format!("BEFORE marker: {}", found(outcome.found_before)),
                format!("AFTER marker: {}", found(outcome.found_after)),
            ],
        ),
        Err(e) => print_format_wrong(target, &[e.to_string()]),
    }
}

fn found(flag: bool) -> &'static str {
    if flag { "found" } else { "missing" }
}

fn print_json(target: &NormalizedPath, result: &std::result::Result<PatchOutcome, BlocksError>, dry_run: bool) -> Result<()> {
    let report = match result {
        Ok(outcome) => {
            let location = outcome.location();
            json!({
                "target": target.as_str(),
                "success": outcome.is_success(),
                "found_before": outcome.found_before,
                "found_after": outcome.found_after,
                "written": outcome.written,
                "dry_run": dry_run,
                "before_line": location.and_then(|l| l.before_line),
                "after_line": location.and_then(|l| l.after_line),
                "removed_lines": location.map(|l| l.block_lines),
                "checksum_before": outcome.checksum_before,
                "checksum_after": outcome.checksum_after,
            })
        }
        Err(e) => json!({
            "target": target.as_str(),
            "success": false,
            "written": false,
            "dry_run": dry_run,
            "error": e.to_string(),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::InjectionManifest;
    use grader_test_utils::TestSubmission;

    fn builtin() -> ResolvedManifest {
        InjectionManifest::default().resolve(Path::new(".")).unwrap()
    }

    #[test]
    fn test_inject_success() {
        let sub = TestSubmission::new().with_marked_target("old\n");

        let status = run_inject(sub.root(), &builtin(), false, false).unwrap();

        assert_eq!(status, Status::Ok);
        sub.assert_target_contains("fn sp2022autograder012()");
    }

    #[test]
    fn test_inject_malformed_is_format_wrong() {
        let sub = TestSubmission::new().with_target("fn main() {}\n");

        let status = run_inject(sub.root(), &builtin(), false, true).unwrap();

        assert_eq!(status, Status::FormatWrong);
        assert_eq!(sub.read_target(), "fn main() {}\n");
    }

    #[test]
    fn test_inject_missing_file_is_error() {
        let sub = TestSubmission::new();
        assert!(run_inject(sub.root(), &builtin(), false, false).is_err());
    }
}
