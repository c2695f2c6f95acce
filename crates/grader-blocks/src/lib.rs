//! Marker-delimited test block injection.
//!
//! A target file carries two sentinel comment lines. Everything strictly
//! between them is owned by the autograder and gets replaced wholesale:
//!
//! ```text
//! fn student_code() {}
//! // DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. BEFORE TEST
//! <injected payload>
//! // DO NOT CHANGE THIS COMMENT, IT IS FOR AUTOGRADER. AFTER TEST
//! fn more_student_code() {}
//! ```
//!
//! Markers are matched as plain substrings, one line at a time. The target
//! language is never parsed, so the marker lines must be unique and appear
//! in order.
//!
//! - [`scanner`] rebuilds content in memory ([`splice`], [`locate`]).
//! - [`patcher`] reads a file, splices it and writes it back ([`patch`]).

pub mod error;
pub mod marker;
pub mod patcher;
pub mod payload;
pub mod scanner;

pub use error::{Error, Result};
pub use marker::MarkerPair;
pub use patcher::{PatchOptions, PatchOutcome, patch, patch_with_options};
pub use payload::Payload;
pub use scanner::{MarkerLocation, ScanState, Splice, locate, splice};
