//! Error types for grader-blocks

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] grader_fs::Error),

    #[error("Invalid marker: {reason}")]
    InvalidMarker { reason: String },

    #[error("Payload contains the marker {marker:?}")]
    PayloadContainsMarker { marker: String },

    #[error("AFTER marker on line {after_line} precedes BEFORE marker on line {before_line}")]
    MarkersOutOfOrder { after_line: usize, before_line: usize },

    #[error("Malformed markers in {path} (before found: {found_before}, after found: {found_after})")]
    MalformedMarkers {
        path: PathBuf,
        found_before: bool,
        found_after: bool,
    },
}

impl Error {
    /// Whether this error means the target file is not laid out the way
    /// injection expects, as opposed to an I/O or setup problem.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MarkersOutOfOrder { .. } | Self::MalformedMarkers { .. }
        )
    }
}
