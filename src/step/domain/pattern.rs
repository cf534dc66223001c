//! Compiled step patterns.

use regex::Regex;

use super::{StepCaptures, StepPatternError};

/// A step pattern: the verbatim source and its compiled regular expression.
#[derive(Debug, Clone)]
pub struct StepPattern {
    source: String,
    regex: Regex,
}

impl StepPattern {
    /// Compiles `source`, optionally anchoring it to the whole step text.
    ///
    /// # Errors
    ///
    /// Returns [`StepPatternError`] when `source` is not a valid regular
    /// expression.
    pub fn compile(source: &str, anchored: bool) -> Result<Self, StepPatternError> {
        let expression = if anchored {
            format!("^(?:{source})$")
        } else {
            source.to_owned()
        };
        let regex = Regex::new(&expression).map_err(|error| StepPatternError {
            pattern: source.to_owned(),
            reason: error.to_string(),
        })?;
        Ok(Self {
            source: source.to_owned(),
            regex,
        })
    }

    /// Returns the pattern exactly as it was declared.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Matches `text`, returning its captured substrings on success.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<StepCaptures> {
        let captures = self.regex.captures(text)?;
        Some(StepCaptures::new(
            captures
                .iter()
                .skip(1)
                .flatten()
                .map(|group| group.as_str()),
        ))
    }
}
