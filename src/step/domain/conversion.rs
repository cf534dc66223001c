//! Conversion of captured substrings into typed step arguments.

use std::any::type_name;
use std::borrow::Cow;

use super::StepDispatchError;

/// Conversion capability from a captured substring into a typed value.
///
/// Implementations return `None` when the substring does not represent a
/// valid value. They must not panic: a failed conversion is reported as a
/// step failure and only that step invocation is abandoned.
///
/// # Examples
///
/// ```
/// use stepbind::step::domain::FromMatch;
///
/// #[derive(Debug, PartialEq)]
/// struct Colour(String);
///
/// impl FromMatch for Colour {
///     fn from_match(captured: &str) -> Option<Self> {
///         matches!(captured, "red" | "green" | "blue").then(|| Self(captured.to_owned()))
///     }
/// }
///
/// assert_eq!(Colour::from_match("red"), Some(Colour("red".to_owned())));
/// assert_eq!(Colour::from_match("mauve"), None);
/// assert_eq!(i32::from_match("42"), Some(42));
/// ```
pub trait FromMatch: Sized {
    /// Converts a captured substring, returning `None` when it is invalid.
    fn from_match(captured: &str) -> Option<Self>;

    /// Human-readable name of the target type used in failure reports.
    ///
    /// Defaults to the type name with module paths removed, so
    /// `alloc::vec::Vec<alloc::string::String>` reads `Vec<String>`.
    #[must_use]
    fn type_label() -> Cow<'static, str> {
        Cow::Owned(strip_module_paths(type_name::<Self>()))
    }
}

macro_rules! from_match_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromMatch for $ty {
                fn from_match(captured: &str) -> Option<Self> {
                    captured.parse().ok()
                }
            }
        )*
    };
}

from_match_via_parse!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl FromMatch for String {
    fn from_match(captured: &str) -> Option<Self> {
        Some(captured.to_owned())
    }
}

impl FromMatch for char {
    fn from_match(captured: &str) -> Option<Self> {
        let mut chars = captured.chars();
        let first = chars.next()?;
        chars.next().is_none().then_some(first)
    }
}

impl FromMatch for bool {
    fn from_match(captured: &str) -> Option<Self> {
        match captured.to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        }
    }
}

/// Converts one captured substring for the step declared with `pattern`.
///
/// # Errors
///
/// Returns [`StepDispatchError::ConversionFailure`] naming the substring,
/// the target type, and the pattern when `T::from_match` rejects the value.
pub fn convert_capture<T: FromMatch>(value: &str, pattern: &str) -> Result<T, StepDispatchError> {
    T::from_match(value).ok_or_else(|| StepDispatchError::ConversionFailure {
        value: value.to_owned(),
        target_type: T::type_label().into_owned(),
        pattern: pattern.to_owned(),
    })
}

/// Drops every `module::` prefix from a fully qualified type name.
fn strip_module_paths(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut rest = full;
    while let Some(separator) = rest.find("::") {
        let (head, tail) = rest.split_at(separator);
        let segment_start = head
            .char_indices()
            .rev()
            .find(|&(_, ch)| !(ch.is_alphanumeric() || ch == '_'))
            .map_or(0, |(index, ch)| index + ch.len_utf8());
        let (kept, _) = head.split_at(segment_start);
        short.push_str(kept);
        rest = tail.strip_prefix("::").unwrap_or(tail);
    }
    short.push_str(rest);
    short
}
