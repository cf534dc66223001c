//! Source locations attached to step definitions for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File and line where a step definition was declared.
///
/// Locations are diagnostic only: they appear in failure reports and log
/// events but never take part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    file: String,
    line: u32,
}

impl SourceLocation {
    /// Creates a location from a file path and line number.
    ///
    /// Prefer [`step_location!`](crate::step_location) at definition sites so
    /// the caller's own `file!()` and `line!()` are recorded.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Returns the file path.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
