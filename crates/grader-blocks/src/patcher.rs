//! File-level injection: read, splice, write back.

use std::path::PathBuf;

use grader_fs::checksum::compute_content_checksum;
use grader_fs::{NormalizedPath, RobustnessConfig, io};

use crate::error::{Error, Result};
use crate::marker::MarkerPair;
use crate::payload::Payload;
use crate::scanner::{self, MarkerLocation, Splice};

/// Options controlling how [`patch_with_options`] touches the disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Build the new content but never write it.
    pub dry_run: bool,
    pub robustness: RobustnessConfig,
}

/// What happened when patching one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub path: NormalizedPath,
    pub found_before: bool,
    pub found_after: bool,
    /// Present when both markers were found.
    pub splice: Option<Splice>,
    /// Whether the file on disk was replaced.
    pub written: bool,
    pub checksum_before: String,
    /// Checksum of the file as it now stands (or would stand, on a dry run).
    pub checksum_after: String,
}

impl PatchOutcome {
    /// Both markers were found and the payload is (or would be) in place.
    pub fn is_success(&self) -> bool {
        self.found_before && self.found_after
    }

    /// Marker positions in the original file, if both were found.
    pub fn location(&self) -> Option<MarkerLocation> {
        self.splice.as_ref().map(|s| s.location)
    }

    /// Converts a failed outcome into `Error::MalformedMarkers`.
    pub fn into_result(self) -> Result<Splice> {
        match self.splice {
            Some(splice) if self.found_before && self.found_after => Ok(splice),
            _ => Err(Error::MalformedMarkers {
                path: PathBuf::from(self.path.as_str()),
                found_before: self.found_before,
                found_after: self.found_after,
            }),
        }
    }
}

/// Injects `payload` between the markers of the file at `path`.
///
/// The file is only rewritten when both markers are present, in order, and
/// the rebuilt content differs from what is on disk.
///
/// # Errors
/// - `Error::Fs` if the file cannot be read or written.
/// - `Error::MarkersOutOfOrder` / `Error::PayloadContainsMarker` from the scan.
///
/// Missing markers are not an error here; check [`PatchOutcome::is_success`]
/// or call [`PatchOutcome::into_result`].
pub fn patch(path: &NormalizedPath, markers: &MarkerPair, payload: &Payload) -> Result<PatchOutcome> {
    patch_with_options(path, markers, payload, PatchOptions::default())
}

/// [`patch`] with explicit options.
pub fn patch_with_options(
    path: &NormalizedPath,
    markers: &MarkerPair,
    payload: &Payload,
    options: PatchOptions,
) -> Result<PatchOutcome> {
    let original = io::read_text(path)?;
    let checksum_before = compute_content_checksum(&original);

    let Some(splice) = scanner::splice(&original, markers, payload)? else {
        let location = scanner::locate(&original, markers)?;
        tracing::debug!(path = %path, ?location, "Markers incomplete, leaving file untouched");
        return Ok(PatchOutcome {
            path: path.clone(),
            found_before: location.found_before(),
            found_after: location.found_after(),
            splice: None,
            written: false,
            checksum_after: checksum_before.clone(),
            checksum_before,
        });
    };

    let checksum_after = compute_content_checksum(&splice.content);
    let written = if !splice.changed {
        tracing::debug!(path = %path, "Test block already up to date, skipping write");
        false
    } else if options.dry_run {
        tracing::info!(path = %path, "[dry-run] Would replace test block");
        false
    } else {
        io::write_atomic(path, splice.content.as_bytes(), options.robustness)?;
        tracing::debug!(
            path = %path,
            removed = splice.location.block_lines,
            inserted = payload.line_count(),
            "Replaced test block"
        );
        true
    };

    Ok(PatchOutcome {
        path: path.clone(),
        found_before: true,
        found_after: true,
        splice: Some(splice),
        written,
        checksum_before,
        checksum_after,
    })
}
