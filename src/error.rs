//! Error types for contract violations inside the engine.
//!
//! Holdings statements are free text, so nothing a caller passes in is ever
//! reported through [`HoldingsError`]. These variants only describe bugs in
//! the static rule table or misuse of the internal helpers.

use thiserror::Error;

/// Error type for malformed internal configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HoldingsError {
    /// A rule's regex declares a different number of capture groups than its
    /// stage consumes.
    #[error("rule \"{rule}\" declares {found} capture group(s), its stage expects {expected}")]
    CaptureArity { rule: &'static str, expected: &'static str, found: usize },

    /// `to_four_digit_year` was called with a context year that is not four
    /// digits or a short year that is not one or two digits.
    #[error("cannot resolve short year \"{short}\" against \"{full}\"")]
    ShortYearContract { full: String, short: String },

    /// A capture group the rule promised to fill was empty or not numeric.
    #[error("rule \"{rule}\" captured \"{text}\", which is not a year")]
    UnparsedYear { rule: &'static str, text: String },
}

/// Convenience alias for results carrying a [`HoldingsError`].
pub type Result<T> = std::result::Result<T, HoldingsError>;
