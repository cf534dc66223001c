//! Gherkin step keywords.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseStepKeywordError;

/// Keyword that may prefix a step text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKeyword {
    /// Establishes context.
    Given,
    /// Describes an action.
    When,
    /// Asserts an outcome.
    Then,
    /// Continues the previous keyword.
    And,
    /// Continues the previous keyword with a contrast.
    But,
}

impl StepKeyword {
    /// All keywords in declaration order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Returns the keyword as written in feature text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKeyword {
    type Err = ParseStepKeywordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|keyword| keyword.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseStepKeywordError(value.to_owned()))
    }
}

/// Splits a leading Gherkin keyword off a step text.
///
/// The keyword must be followed by whitespace; the remainder is returned
/// with surrounding whitespace trimmed. Texts without a keyword are returned
/// trimmed and unchanged otherwise.
///
/// # Examples
///
/// ```
/// use stepbind::step::domain::{StepKeyword, strip_keyword};
///
/// assert_eq!(
///     strip_keyword("Given I have 3 cukes"),
///     (Some(StepKeyword::Given), "I have 3 cukes"),
/// );
/// assert_eq!(strip_keyword("Andrew arrives"), (None, "Andrew arrives"));
/// ```
#[must_use]
pub fn strip_keyword(text: &str) -> (Option<StepKeyword>, &str) {
    let trimmed = text.trim();
    let Some((head, rest)) = trimmed.split_once(char::is_whitespace) else {
        return (None, trimmed);
    };
    head.parse::<StepKeyword>()
        .map_or((None, trimmed), |keyword| (Some(keyword), rest.trim_start()))
}
