//! Shared test utilities for the grader workspace.
//!
//! [`TestSubmission`] builds a throwaway student submission directory with a
//! marker-bearing target file. Dev-dependency only, never published.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Marker line opening the autograder block.
pub const BEFORE: &str = "// DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. BEFORE TEST";
/// Marker line closing the autograder block.
pub const AFTER: &str = "// DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. AFTER TEST";
/// Default target file inside a submission.
pub const TARGET: &str = "src/types/merkle.rs";

/// A temporary submission directory.
///
/// # Example
///
/// ```rust,no_run
/// use grader_test_utils::TestSubmission;
///
/// let sub = TestSubmission::new().with_marked_target("// old tests\n");
/// sub.assert_target_contains("// old tests");
/// ```
pub struct TestSubmission {
    temp_dir: TempDir,
}

impl Default for TestSubmission {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSubmission {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the submission.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of the default target file.
    pub fn target_path(&self) -> PathBuf {
        self.root().join(TARGET)
    }

    /// Write a file relative to the submission root, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write the default target with student code around a marked block
    /// holding `block`.
    pub fn with_marked_target(self, block: &str) -> Self {
        let content = marked_source(block);
        self.write_file(TARGET, &content);
        self
    }

    /// Write the default target with arbitrary content.
    pub fn with_target(self, content: &str) -> Self {
        self.write_file(TARGET, content);
        self
    }

    /// Read the default target back.
    pub fn read_target(&self) -> String {
        fs::read_to_string(self.target_path()).unwrap()
    }

    /// Assert the default target contains `needle`.
    pub fn assert_target_contains(&self, needle: &str) {
        let content = self.read_target();
        assert!(
            content.contains(needle),
            "expected {} to contain {:?}, got:\n{}",
            TARGET,
            needle,
            content
        );
    }
}

/// A small Merkle-tree style source file with the autograder markers
/// wrapped around `block`.
pub fn marked_source(block: &str) -> String {
    format!(
        "use crate::types::hash::H256;\n\
         \n\
         pub struct MerkleTree {{}}\n\
         \n\
         {BEFORE}\n\
         {block}\
         {AFTER}\n\
         \n\
         // student helper code below\n\
         fn helper() {{}}\n"
    )
}
