//! Parse error type.
//!
//! Parsing raises exactly one kind of error: a required-mode option whose
//! following token is absent or itself flag-like. Every other anomaly —
//! unknown flags, optional-mode options with no usable argument — is
//! absorbed silently by design; callers wanting stricter behavior inspect
//! the parse outcome instead.

use thiserror::Error;

/// Errors raised by the parse entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required-mode option was matched but no argument token could be
    /// consumed. Carries the option's canonical key.
    #[error("missing compulsory argument for option: {key}")]
    MissingCompulsoryArgument { key: String },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
