//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Autograder test injector - replace the test block between the autograder
/// markers of a student submission
#[derive(Parser, Debug)]
#[command(name = "grader")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Injection manifest (TOML, JSON or YAML) to use instead of the
    /// built-in Merkle tree tests
    #[arg(short, long, global = true, env = "GRADER_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Submission directory; shorthand for `grader inject <DIR>`
    pub dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Replace the test block in a submission
    ///
    /// Examples:
    ///   grader inject ./submission
    ///   grader inject ./submission --dry-run
    ///   grader --manifest warmup3.toml inject ./submission
    Inject {
        /// Submission directory containing the target file
        dir: PathBuf,

        /// Build the new content without writing it
        #[arg(long)]
        dry_run: bool,

        /// Output a JSON report for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report marker positions without modifying anything
    Check {
        /// Submission directory containing the target file
        dir: PathBuf,

        /// Output a JSON report for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the diff injection would apply
    Diff {
        /// Submission directory containing the target file
        dir: PathBuf,
    },

    /// Write the active manifest to a file as a starting point
    Manifest {
        /// Output file; the format follows the extension
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_directory_argument() {
        let cli = Cli::try_parse_from(["grader", "submission"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("submission")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_inject_subcommand() {
        let cli = Cli::try_parse_from(["grader", "inject", "sub", "--dry-run"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Inject {
                dir: PathBuf::from("sub"),
                dry_run: true,
                json: false,
            })
        );
    }

    #[test]
    fn test_global_manifest_flag() {
        let cli = Cli::try_parse_from(["grader", "check", "sub", "--manifest", "m.toml"]).unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("m.toml")));
    }
}
