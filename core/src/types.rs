//! Option entity definitions.
//!
//! This module defines the core data model for declared options: the
//! argument expectation ([`ArgMode`]), the runtime value representation
//! ([`Value`]), and the option entity itself ([`OptionSpec`]). Options are
//! created once during registration (usually through the
//! [`define`](crate::define) builder) and live for the lifetime of one
//! parsing session; the runtime value is the only field written after
//! construction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Argument expectation for a declared option.
///
/// # Examples
///
/// ```
/// use optdef_core::ArgMode;
///
/// let mode = ArgMode::default();
/// assert_eq!(mode, ArgMode::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArgMode {
    /// The option consumes no argument; matching it records presence.
    #[default]
    None,
    /// The option must be followed by a non-flag token.
    Required,
    /// The option may consume a following non-flag token, or resolve to
    /// no value.
    Optional,
}

/// A runtime or default value held by an option.
///
/// Presence flags and switches carry [`Flag`](Value::Flag) values;
/// consumed argument tokens are stored verbatim as [`Text`](Value::Text).
///
/// # Examples
///
/// ```
/// use optdef_core::Value;
///
/// let v = Value::from("Lee");
/// assert_eq!(v.as_str(), Some("Lee"));
/// assert_eq!(v.as_bool(), None);
///
/// let b = Value::from(true);
/// assert_eq!(b.as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean presence/switch value.
    Flag(bool),
    /// Captured argument token.
    Text(String),
}

impl Value {
    /// Returns the text payload, if this is a [`Text`](Value::Text) value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Flag(_) => None,
        }
    }

    /// Returns the boolean payload, if this is a [`Flag`](Value::Flag) value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            Value::Text(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One declared flag/option with its metadata and mutable runtime value.
///
/// An option has an optional single-character short form (invoked as `-x`)
/// and/or a multi-character long form (invoked as `--xxxx`), an argument
/// expectation, and optional display and runtime metadata. At least one of
/// the two forms must be set; [`validate`](crate::validate) reports
/// registrations that violate this.
///
/// Use [`new`](OptionSpec::new) and the chainable `with_*` methods to build
/// one directly, or let the [`define`](crate::define) builder construct it
/// from positional registration values.
///
/// # Examples
///
/// ```
/// use optdef_core::{ArgMode, OptionSpec};
///
/// let name = OptionSpec::new(Some('n'), Some("name"))
///     .with_description("Name to greet")
///     .with_mode(ArgMode::Required);
///
/// assert_eq!(name.key(), "name");
/// assert!(name.matches("n"));
/// assert!(name.matches("name"));
/// assert!(name.expects_argument());
/// ```
pub struct OptionSpec {
    /// Short form without its dash (e.g. `n` for `-n`).
    pub short: Option<char>,
    /// Long form without its dashes (e.g. `name` for `--name`).
    pub long: Option<String>,
    /// Human-readable description, display only.
    pub description: Option<String>,
    /// Argument expectation.
    pub mode: ArgMode,
    /// Toggled presence flag: matching flips the boolean runtime value.
    pub switch: bool,
    /// Value reported when no argument was captured.
    pub default: Option<Value>,
    callback: Option<Box<dyn FnMut()>>,
    value: Option<Value>,
}

impl OptionSpec {
    /// Creates an option with the given short and long forms and no other
    /// metadata.
    pub fn new(short: Option<char>, long: Option<&str>) -> Self {
        Self {
            short,
            long: long.map(String::from),
            description: None,
            mode: ArgMode::None,
            switch: false,
            default: None,
            callback: None,
            value: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the argument expectation.
    pub fn with_mode(mut self, mode: ArgMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the default value reported when no argument was captured.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the option as a toggled switch.
    pub fn as_switch(mut self) -> Self {
        self.switch = true;
        self
    }

    /// Attaches a callback invoked the instant the flag is recognized,
    /// before any argument consumption.
    pub fn with_callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Returns the canonical identifier: the long form if present, else the
    /// short form.
    ///
    /// # Examples
    ///
    /// ```
    /// use optdef_core::OptionSpec;
    ///
    /// assert_eq!(OptionSpec::new(Some('v'), Some("verbose")).key(), "verbose");
    /// assert_eq!(OptionSpec::new(Some('v'), None).key(), "v");
    /// ```
    pub fn key(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Checks whether a flag name (without dashes) refers to this option.
    pub fn matches(&self, name: &str) -> bool {
        if self.long.as_deref() == Some(name) {
            return true;
        }
        let mut chars = name.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if Some(c) == self.short)
    }

    /// Returns `true` when a following argument token is compulsory.
    pub fn expects_argument(&self) -> bool {
        self.mode == ArgMode::Required
    }

    /// Returns `true` when the option can consume a following token.
    pub fn accepts_argument(&self) -> bool {
        matches!(self.mode, ArgMode::Required | ArgMode::Optional)
    }

    /// The runtime value captured during the last parse, if any.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The runtime value if set, else the declared default.
    pub fn value_or_default(&self) -> Option<&Value> {
        self.value.as_ref().or(self.default.as_ref())
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// Flips the boolean runtime value, starting from the default (or
    /// `false`) when unset.
    pub(crate) fn toggle(&mut self) {
        let current = self
            .value
            .as_ref()
            .or(self.default.as_ref())
            .and_then(Value::as_bool)
            .unwrap_or(false);
        self.value = Some(Value::Flag(!current));
    }

    pub(crate) fn notify_matched(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("description", &self.description)
            .field("mode", &self.mode)
            .field("switch", &self.switch)
            .field("default", &self.default)
            .field("callback", &self.callback.is_some())
            .field("value", &self.value)
            .finish()
    }
}
