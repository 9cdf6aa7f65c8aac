//! Heuristic normalization of positional registration values.
//!
//! Registration calls accept up to four positional values whose meaning is
//! inferred from position and shape: short form, long form, description,
//! and argument requirement. [`normalize`] turns such a list into a
//! canonical [`NormalizedSpec`] with a fixed, deterministic algorithm:
//!
//! 1. A missing first value, or a first value longer than one character, is
//!    treated as "no short form" — the list is shifted right by one.
//! 2. The list is right-padded to three slots; a fourth slot defaulting to
//!    "argument not required" is appended when exactly three are present.
//! 3. A long-name slot that is not made of letters, underscores, and
//!    hyphens only is reclassified as the description.
//! 4. A literal `true` in the description slot is caller shorthand for
//!    "requires an argument, no description".
//!
//! The quirks are deliberate and preserved: a one-character value is never
//! mistaken for a description (only length and character class separate the
//! roles), and boolean `true` in the description position is a recognized
//! shorthand rather than an error. Normalizing an already-canonical list is
//! a no-op.
//!
//! Each positional value arrives tagged as a [`Slot`], so classification
//! reads the payload kind explicitly instead of re-deriving it from
//! incidental type checks. Explicit [`Overrides`] always win over inferred
//! slots.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{ArgMode, OptionSpec, Value};

/// Character class accepted in the long-name slot.
static LONG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_-]+$").expect("static regex must compile"));

/// One tagged positional value in a registration call.
///
/// # Examples
///
/// ```
/// use optdef_core::Slot;
///
/// let text = Slot::from("name");
/// let shorthand = Slot::from(true);
/// assert_ne!(text, shorthand);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A string payload: short form, long form, or description.
    Text(String),
    /// A boolean payload: the required-argument shorthand or the explicit
    /// argument-requirement slot.
    Truth(bool),
}

impl From<&str> for Slot {
    fn from(s: &str) -> Self {
        Slot::Text(s.to_string())
    }
}

impl From<String> for Slot {
    fn from(s: String) -> Self {
        Slot::Text(s)
    }
}

impl From<char> for Slot {
    fn from(c: char) -> Self {
        Slot::Text(c.to_string())
    }
}

impl From<bool> for Slot {
    fn from(b: bool) -> Self {
        Slot::Truth(b)
    }
}

/// Conversion into a positional slot list, so registrations read naturally
/// as tuples of mixed values.
///
/// # Examples
///
/// ```
/// use optdef_core::IntoSlots;
///
/// let slots = ("n", "name", "Name to greet", true).into_slots();
/// assert_eq!(slots.len(), 4);
/// ```
pub trait IntoSlots {
    fn into_slots(self) -> Vec<Slot>;
}

impl IntoSlots for () {
    fn into_slots(self) -> Vec<Slot> {
        Vec::new()
    }
}

impl IntoSlots for Vec<Slot> {
    fn into_slots(self) -> Vec<Slot> {
        self
    }
}

impl IntoSlots for &str {
    fn into_slots(self) -> Vec<Slot> {
        vec![Slot::from(self)]
    }
}

impl IntoSlots for String {
    fn into_slots(self) -> Vec<Slot> {
        vec![Slot::from(self)]
    }
}

impl IntoSlots for char {
    fn into_slots(self) -> Vec<Slot> {
        vec![Slot::from(self)]
    }
}

impl<A: Into<Slot>> IntoSlots for (A,) {
    fn into_slots(self) -> Vec<Slot> {
        vec![self.0.into()]
    }
}

impl<A: Into<Slot>, B: Into<Slot>> IntoSlots for (A, B) {
    fn into_slots(self) -> Vec<Slot> {
        vec![self.0.into(), self.1.into()]
    }
}

impl<A: Into<Slot>, B: Into<Slot>, C: Into<Slot>> IntoSlots for (A, B, C) {
    fn into_slots(self) -> Vec<Slot> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

impl<A: Into<Slot>, B: Into<Slot>, C: Into<Slot>, D: Into<Slot>> IntoSlots for (A, B, C, D) {
    fn into_slots(self) -> Vec<Slot> {
        vec![self.0.into(), self.1.into(), self.2.into(), self.3.into()]
    }
}

/// Explicit attribute overrides for a registration.
///
/// Every set field wins over the value inferred from positional slots.
///
/// # Examples
///
/// ```
/// use optdef_core::{ArgMode, Overrides};
///
/// let overrides = Overrides::default()
///     .mode(ArgMode::Optional)
///     .default_value("out.txt");
/// assert_eq!(overrides.mode, Some(ArgMode::Optional));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub short: Option<char>,
    pub long: Option<String>,
    pub description: Option<String>,
    pub mode: Option<ArgMode>,
    pub default: Option<Value>,
    pub switch: Option<bool>,
}

impl Overrides {
    /// Overrides the short form.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Overrides the long form.
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Overrides the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Overrides the argument expectation.
    pub fn mode(mut self, mode: ArgMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Declares a default value.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Declares the option as a toggled switch.
    pub fn switch(mut self, switch: bool) -> Self {
        self.switch = Some(switch);
        self
    }
}

/// Canonical result of normalizing a positional slot list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSpec {
    pub short: Option<char>,
    pub long: Option<String>,
    pub description: Option<String>,
    pub mode: ArgMode,
}

impl NormalizedSpec {
    /// Applies explicit overrides on top of the inferred tuple.
    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if overrides.short.is_some() {
            self.short = overrides.short;
        }
        if let Some(long) = &overrides.long {
            self.long = Some(long.clone());
        }
        if let Some(description) = &overrides.description {
            self.description = Some(description.clone());
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        self
    }

    /// Builds an option entity from the canonical tuple.
    pub fn into_spec(self) -> OptionSpec {
        let mut spec = OptionSpec::new(self.short, self.long.as_deref()).with_mode(self.mode);
        if let Some(description) = &self.description {
            spec = spec.with_description(description);
        }
        spec
    }
}

/// Working slot state: the two payload kinds plus the padding placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Raw {
    Unset,
    Text(String),
    Truth(bool),
}

impl From<&Slot> for Raw {
    fn from(slot: &Slot) -> Self {
        match slot {
            Slot::Text(s) => Raw::Text(s.clone()),
            Slot::Truth(b) => Raw::Truth(*b),
        }
    }
}

/// Normalizes an ordered list of positional registration values into the
/// canonical `(short, long, description, mode)` tuple.
///
/// Pure and deterministic; see the module docs for the algorithm. Slots
/// beyond index 3 are ignored.
///
/// # Examples
///
/// ```
/// use optdef_core::{ArgMode, IntoSlots, normalize};
///
/// // Full form: every slot explicit.
/// let full = normalize(&("n", "name", "Name to greet", true).into_slots());
/// assert_eq!(full.short, Some('n'));
/// assert_eq!(full.long.as_deref(), Some("name"));
/// assert_eq!(full.mode, ArgMode::Required);
///
/// // Long name only: the missing short slot is inferred.
/// let long_only = normalize(&("verbose", "Enable verbose mode").into_slots());
/// assert_eq!(long_only.short, None);
/// assert_eq!(long_only.long.as_deref(), Some("verbose"));
/// assert_eq!(long_only.description.as_deref(), Some("Enable verbose mode"));
///
/// // Shorthand: `true` after the short form means "requires an argument".
/// let shorthand = normalize(&("n", true).into_slots());
/// assert_eq!(shorthand.short, Some('n'));
/// assert_eq!(shorthand.mode, ArgMode::Required);
/// ```
pub fn normalize(slots: &[Slot]) -> NormalizedSpec {
    let mut raw: Vec<Raw> = slots.iter().map(Raw::from).collect();

    // A bare string longer than one character is a long name, not a short
    // form: shift everything right.
    let missing_short = match raw.first() {
        None => true,
        Some(Raw::Text(s)) => s.chars().count() > 1,
        Some(_) => false,
    };
    if missing_short {
        raw.insert(0, Raw::Unset);
    }

    while raw.len() < 3 {
        raw.push(Raw::Unset);
    }
    if raw.len() == 3 {
        raw.push(Raw::Truth(false));
    }

    // A long-name slot outside the letters/underscores/hyphens class is a
    // description. Non-string payloads never match the class.
    let is_long_name = match &raw[1] {
        Raw::Text(s) => LONG_NAME_RE.is_match(s),
        _ => false,
    };
    if !is_long_name && raw[1] != Raw::Unset {
        raw[2] = std::mem::replace(&mut raw[1], Raw::Unset);
    }

    // Literal `true` in the description slot: required argument, no
    // description.
    if raw[2] == Raw::Truth(true) {
        raw[2] = Raw::Unset;
        raw[3] = Raw::Truth(true);
    }

    let short = match &raw[0] {
        Raw::Text(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
        _ => None,
    };
    let long = match &raw[1] {
        Raw::Text(s) => Some(s.clone()),
        _ => None,
    };
    let description = match &raw[2] {
        Raw::Text(s) => Some(s.clone()),
        _ => None,
    };
    let mode = match raw[3] {
        Raw::Truth(true) => ArgMode::Required,
        _ => ArgMode::None,
    };

    NormalizedSpec {
        short,
        long,
        description,
        mode,
    }
}
