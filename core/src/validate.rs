//! Advisory registry validation.
//!
//! Duplicate or nameless registrations are caller errors with first-match
//! (and therefore surprising) behavior at parse time. Validation catches
//! them up front without changing parse semantics: [`parse`](crate::parse)
//! never validates, so permissive callers keep the documented
//! first-match/silent-drop behavior.
//!
//! # Examples
//!
//! ```
//! use optdef_core::{define, validate};
//!
//! let registry = define(|d| {
//!     d.option(("n", "name", true));
//!     d.option(("v", "verbose"));
//! });
//! assert!(validate(&registry).is_empty());
//!
//! let clashing = define(|d| {
//!     d.option(("n", "name"));
//!     d.option(("n", "number"));
//! });
//! assert!(!validate(&clashing).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::registry::Registry;

/// Structural problems found in a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An option has neither short nor long form.
    #[error("option must define a short or long form")]
    MissingOptionName,
    /// Two options share the same short form.
    #[error("duplicate short form: -{0}")]
    DuplicateShort(char),
    /// Two options share the same long form.
    #[error("duplicate long form: --{0}")]
    DuplicateLong(String),
    /// A long form is a single character and belongs in the short slot.
    #[error("long form too short: --{0}")]
    LongFormTooShort(String),
    /// A positional name is empty.
    #[error("positional name cannot be empty")]
    EmptyPositionalName,
    /// Two positional declarations share a name.
    #[error("duplicate positional name: {0}")]
    DuplicatePositional(String),
}

/// Validates a registry, returning every structural problem found.
pub fn validate(registry: &Registry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut shorts: HashSet<char> = HashSet::new();
    let mut longs: HashSet<&str> = HashSet::new();
    for option in registry.options() {
        if option.short.is_none() && option.long.is_none() {
            errors.push(ValidationError::MissingOptionName);
            continue;
        }
        if let Some(short) = option.short {
            if !shorts.insert(short) {
                errors.push(ValidationError::DuplicateShort(short));
            }
        }
        if let Some(long) = option.long.as_deref() {
            if long.chars().count() < 2 {
                errors.push(ValidationError::LongFormTooShort(long.to_string()));
            }
            if !longs.insert(long) {
                errors.push(ValidationError::DuplicateLong(long.to_string()));
            }
        }
    }

    let mut names: HashSet<&str> = HashSet::new();
    for name in registry.positional_names() {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyPositionalName);
            continue;
        }
        if !names.insert(name) {
            errors.push(ValidationError::DuplicatePositional(name.clone()));
        }
    }

    errors
}
