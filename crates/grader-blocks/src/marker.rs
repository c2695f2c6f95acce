//! Sentinel marker pair.

use crate::error::{Error, Result};
use crate::payload::Payload;

/// The two literal substrings that bracket the managed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    before: String,
    after: String,
}

impl MarkerPair {
    /// Creates a marker pair.
    ///
    /// # Errors
    /// Returns `Error::InvalidMarker` if either marker is empty, spans
    /// multiple lines, or both markers are identical.
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Result<Self> {
        let before = before.into();
        let after = after.into();

        for (name, marker) in [("before", &before), ("after", &after)] {
            if marker.is_empty() {
                return Err(Error::InvalidMarker {
                    reason: format!("{} marker is empty", name),
                });
            }
            if marker.contains('\n') || marker.contains('\r') {
                return Err(Error::InvalidMarker {
                    reason: format!("{} marker spans multiple lines", name),
                });
            }
        }
        if before == after {
            return Err(Error::InvalidMarker {
                reason: "before and after markers are identical".into(),
            });
        }

        Ok(Self { before, after })
    }

    pub fn before(&self) -> &str {
        &self.before
    }

    pub fn after(&self) -> &str {
        &self.after
    }

    /// Rejects payloads that would be mistaken for marker lines on the next run.
    pub(crate) fn check_payload(&self, payload: &Payload) -> Result<()> {
        for marker in [&self.before, &self.after] {
            if payload.as_str().contains(marker.as_str()) {
                return Err(Error::PayloadContainsMarker {
                    marker: marker.clone(),
                });
            }
        }
        Ok(())
    }
}
