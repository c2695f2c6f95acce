//! Command implementations

mod check;
mod diff;
mod inject;
mod manifest;

pub use check::run_check;
pub use diff::run_diff;
pub use inject::run_inject;
pub use manifest::run_manifest;

use colored::Colorize;
use grader_fs::NormalizedPath;

/// How a command that inspected a target file ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Markers missing or out of order; nothing was written.
    FormatWrong,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::FormatWrong => 2,
        }
    }
}

/// Directory shown in front of every status line.
fn target_dir(target: &NormalizedPath) -> String {
    target
        .parent()
        .map(|p| p.to_string())
        .unwrap_or_else(|| ".".to_string())
}

fn print_format_wrong(target: &NormalizedPath, details: &[String]) {
    println!("{} {}", target_dir(target).yellow(), "Code format wrong".red().bold());
    for detail in details {
        println!("  {}", detail.dimmed());
    }
}

fn describe_line(line: Option<usize>) -> String {
    match line {
        Some(n) => format!("line {}", n),
        None => "missing".to_string(),
    }
}
