//! Filesystem helpers for the autograder test injector
//!
//! Provides normalized path handling, locked atomic writes and
//! format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
