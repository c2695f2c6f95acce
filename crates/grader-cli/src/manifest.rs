//! Injection manifest: which file to patch, with which markers and payload.

use std::path::Path;

use grader_blocks::{MarkerPair, Payload};
use grader_fs::{ConfigStore, NormalizedPath, io};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Merkle tree autograder tests injected when no manifest is given.
pub const BUILTIN_PAYLOAD: &str = include_str!("../payloads/merkle_tests.rs.in");

pub const DEFAULT_TARGET: &str = "src/types/merkle.rs";
pub const DEFAULT_BEFORE: &str = "// DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. BEFORE TEST";
pub const DEFAULT_AFTER: &str = "// DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. AFTER TEST";

/// On-disk manifest format.
///
/// ```toml
/// target = "src/types/merkle.rs"
/// before_marker = "// DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. BEFORE TEST"
/// after_marker = "// DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. AFTER TEST"
/// payload_file = "merkle_tests.rs"
/// ```
///
/// With neither `payload` nor `payload_file` set, the built-in tests are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InjectionManifest {
    /// Target file, relative to the submission directory
    pub target: String,
    pub before_marker: String,
    pub after_marker: String,
    /// Inline payload text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Payload file, relative to the manifest's own directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_file: Option<String>,
}

impl Default for InjectionManifest {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.into(),
            before_marker: DEFAULT_BEFORE.into(),
            after_marker: DEFAULT_AFTER.into(),
            payload: None,
            payload_file: None,
        }
    }
}

/// A manifest with its markers validated and its payload loaded.
#[derive(Debug, Clone)]
pub struct ResolvedManifest {
    pub target: String,
    pub markers: MarkerPair,
    pub payload: Payload,
}

impl ResolvedManifest {
    /// Absolute-or-relative path of the target inside `dir`.
    ///
    /// `dir` is taken as given (a leading `..` stays); only the manifest's
    /// relative target is cleaned.
    pub fn target_in(&self, dir: &Path) -> NormalizedPath {
        NormalizedPath::verbatim(dir).join(&self.target)
    }
}

impl InjectionManifest {
    /// Load a manifest from disk; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let manifest = ConfigStore::new().load(&NormalizedPath::verbatim(path))?;
        tracing::debug!(manifest = %path.display(), "Loaded injection manifest");
        Ok(manifest)
    }

    /// Copy of this manifest with the payload spelled out inline.
    pub fn with_inline_payload(self, payload: &Payload) -> Self {
        Self {
            payload: Some(payload.as_str().to_string()),
            payload_file: None,
            ..self
        }
    }

    /// Validate markers and load the payload.
    ///
    /// `base_dir` is the directory a relative `payload_file` resolves against.
    pub fn resolve(&self, base_dir: &Path) -> Result<ResolvedManifest> {
        if self.target.trim().is_empty() {
            return Err(CliError::user("manifest target must not be empty"));
        }

        let markers = MarkerPair::new(self.before_marker.as_str(), self.after_marker.as_str())?;

        let text = match (&self.payload, &self.payload_file) {
            (Some(_), Some(_)) => {
                return Err(CliError::user(
                    "manifest sets both `payload` and `payload_file`; pick one",
                ));
            }
            (Some(inline), None) => inline.clone(),
            (None, Some(file)) => {
                // Manifest authors may point outside the manifest directory
                io::read_text(&NormalizedPath::verbatim(base_dir.join(file)))?
            }
            (None, None) => BUILTIN_PAYLOAD.to_string(),
        };

        Ok(ResolvedManifest {
            target: self.target.clone(),
            markers,
            payload: Payload::new(text),
        })
    }
}
