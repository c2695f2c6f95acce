//! Single-pass marker scanning and block replacement.
//!
//! The scan walks the content one line at a time (terminators included, so
//! untouched lines come out byte-identical) and moves through three states:
//!
//! ```text
//! BeforeBlock --(BEFORE line)--> InsideBlock --(AFTER line)--> AfterBlock
//! ```
//!
//! Lines are kept in `BeforeBlock` and `AfterBlock` and dropped in
//! `InsideBlock`. The payload is emitted once, right after the BEFORE line.

use crate::error::{Error, Result};
use crate::marker::MarkerPair;
use crate::payload::Payload;

/// Where the scan currently sits relative to the managed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No BEFORE marker seen yet.
    BeforeBlock,
    /// BEFORE seen, waiting for AFTER. Old block lines are dropped here.
    InsideBlock,
    /// Both markers seen; the rest of the file is kept verbatim.
    AfterBlock,
}

/// 1-based line numbers of the marker lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerLocation {
    /// First line containing the BEFORE marker.
    pub before_line: Option<usize>,
    /// First line containing the AFTER marker at or after `before_line`.
    /// When BEFORE is missing this is the first AFTER line anywhere.
    pub after_line: Option<usize>,
    /// Number of lines currently between the markers.
    pub block_lines: usize,
}

impl MarkerLocation {
    pub fn found_before(&self) -> bool {
        self.before_line.is_some()
    }

    pub fn found_after(&self) -> bool {
        self.after_line.is_some()
    }

    /// Both markers present and in order.
    pub fn is_well_formed(&self) -> bool {
        self.found_before() && self.found_after()
    }
}

/// Result of rebuilding content around a well-formed marker pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// The rebuilt content.
    pub content: String,
    /// Marker positions in the original content.
    pub location: MarkerLocation,
    /// Whether `content` differs from the input.
    pub changed: bool,
}

struct Scanner<'a> {
    markers: &'a MarkerPair,
    payload: &'a Payload,
    state: ScanState,
    output: String,
    location: MarkerLocation,
    stray_after: Option<usize>,
}

impl<'a> Scanner<'a> {
    fn new(markers: &'a MarkerPair, payload: &'a Payload, capacity: usize) -> Self {
        Self {
            markers,
            payload,
            state: ScanState::BeforeBlock,
            output: String::with_capacity(capacity + payload.as_str().len()),
            location: MarkerLocation::default(),
            stray_after: None,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) {
        let has_before = line.contains(self.markers.before());
        let has_after = line.contains(self.markers.after());

        match self.state {
            ScanState::BeforeBlock => {
                self.output.push_str(line);
                if has_before {
                    self.location.before_line = Some(line_no);
                    self.emit_payload(line);
                    self.state = ScanState::InsideBlock;
                    tracing::debug!(line = line_no, "Entered managed block");
                    if has_after {
                        self.close_block(line_no);
                    }
                } else if has_after && self.stray_after.is_none() {
                    self.stray_after = Some(line_no);
                }
            }
            ScanState::InsideBlock => {
                if has_after {
                    self.output.push_str(line);
                    self.close_block(line_no);
                } else {
                    self.location.block_lines += 1;
                    if has_before {
                        tracing::warn!(line = line_no, "Duplicate BEFORE marker inside block, dropping it");
                    }
                }
            }
            ScanState::AfterBlock => {
                if has_before || has_after {
                    tracing::warn!(line = line_no, "Marker repeated after the managed block, keeping line as-is");
                }
                self.output.push_str(line);
            }
        }
    }

    fn emit_payload(&mut self, marker_line: &str) {
        if self.payload.is_empty() {
            return;
        }
        if !marker_line.ends_with('\n') {
            self.output.push('\n');
        }
        self.output.push_str(self.payload.as_str());
    }

    fn close_block(&mut self, line_no: usize) {
        self.location.after_line = Some(line_no);
        self.state = ScanState::AfterBlock;
        tracing::debug!(
            line = line_no,
            dropped = self.location.block_lines,
            "Left managed block"
        );
    }

    fn finish(self) -> Result<(ScanState, MarkerLocation, String)> {
        let mut location = self.location;
        if let Some(after_line) = self.stray_after {
            match location.before_line {
                Some(before_line) => {
                    return Err(Error::MarkersOutOfOrder {
                        after_line,
                        before_line,
                    });
                }
                None => location.after_line = Some(after_line),
            }
        }
        Ok((self.state, location, self.output))
    }
}

fn scan(content: &str, markers: &MarkerPair, payload: &Payload) -> Result<(ScanState, MarkerLocation, String)> {
    markers.check_payload(payload)?;

    let mut scanner = Scanner::new(markers, payload, content.len());
    for (idx, line) in content.split_inclusive('\n').enumerate() {
        scanner.feed(idx + 1, line);
    }
    scanner.finish()
}

/// Rebuilds `content` with `payload` placed between the markers.
///
/// Returns `Ok(None)` when the markers are missing, leaving the caller to
/// decide how to report it.
///
/// # Errors
/// - `Error::MarkersOutOfOrder` if an AFTER line precedes the first BEFORE line.
/// - `Error::PayloadContainsMarker` if the payload would confuse the next scan.
///
/// # Example
/// ```
/// use grader_blocks::{MarkerPair, Payload, splice};
///
/// let markers = MarkerPair::new("// BEFORE", "// AFTER").unwrap();
/// let content = "A\n// BEFORE\nX\nY\n// AFTER\nB\n";
///
/// let spliced = splice(content, &markers, &Payload::new("P")).unwrap().unwrap();
/// assert_eq!(spliced.content, "A\n// BEFORE\nP\n// AFTER\nB\n");
/// assert_eq!(spliced.location.block_lines, 2);
/// ```
pub fn splice(content: &str, markers: &MarkerPair, payload: &Payload) -> Result<Option<Splice>> {
    let (state, location, output) = scan(content, markers, payload)?;

    if state != ScanState::AfterBlock {
        tracing::debug!(?state, "Scan ended without a complete marker pair");
        return Ok(None);
    }

    Ok(Some(Splice {
        changed: output != content,
        content: output,
        location,
    }))
}

/// Reports where the markers sit without building new content.
///
/// # Errors
/// Returns `Error::MarkersOutOfOrder` under the same rule as [`splice`].
pub fn locate(content: &str, markers: &MarkerPair) -> Result<MarkerLocation> {
    let (_, location, _) = scan(content, markers, &Payload::default())?;
    Ok(location)
}
