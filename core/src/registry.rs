//! Option registry and parse results.
//!
//! A [`Registry`] is the insertion-ordered collection of declared options
//! and positional-argument names for one parsing session. Parsing consumes
//! it and returns a [`ParseOutcome`] that owns the updated registry
//! together with leftover tokens and positional bindings. Both are plain
//! caller-owned values; nothing is shared between sessions.

use std::collections::HashMap;
use std::fmt;

use crate::types::{OptionSpec, Value};

/// Declared options and positional names for one parsing session.
///
/// Enumeration and display follow insertion order; lookup is first-match.
/// Duplicate short or long forms are a caller error reported by
/// [`validate`](crate::validate), not a supported feature.
///
/// # Examples
///
/// ```
/// use optdef_core::{ArgMode, OptionSpec, Registry};
///
/// let mut registry = Registry::new();
/// registry.add(OptionSpec::new(Some('n'), Some("name")).with_mode(ArgMode::Required));
/// registry.add_positional("source");
///
/// assert!(registry.option_for("name").is_some());
/// assert_eq!(registry.positional_names(), ["source"]);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    banner: Option<String>,
    options: Vec<OptionSpec>,
    positional: Vec<String>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the banner line shown first when the registry is displayed.
    pub fn set_banner(&mut self, banner: &str) {
        self.banner = Some(banner.to_string());
    }

    /// The banner line, if one was set.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Appends a declared option.
    pub fn add(&mut self, option: OptionSpec) {
        self.options.push(option);
    }

    /// Appends a declared positional-argument name.
    pub fn add_positional(&mut self, name: &str) {
        self.positional.push(name.to_string());
    }

    /// Declared options in insertion order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Declared positional-argument names in declaration order.
    pub fn positional_names(&self) -> &[String] {
        &self.positional
    }

    /// Finds the first option whose short or long form equals `name`.
    pub fn option_for(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.matches(name))
    }

    pub(crate) fn option_for_mut(&mut self, name: &str) -> Option<&mut OptionSpec> {
        self.options.iter_mut().find(|option| option.matches(name))
    }
}

impl fmt::Display for Registry {
    /// Renders the banner (when set) followed by one line per declared
    /// option, in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(banner) = &self.banner {
            writeln!(f, "{banner}")?;
        }
        for option in &self.options {
            let short = option
                .short
                .map(|c| format!("-{c}"))
                .unwrap_or_else(|| "  ".to_string());
            let long = option
                .long
                .as_deref()
                .map(|l| format!("--{l}"))
                .unwrap_or_default();
            let separator = if option.short.is_some() && option.long.is_some() {
                ", "
            } else {
                "  "
            };
            let heading = format!("{short}{separator}{long}");
            match &option.description {
                Some(description) => writeln!(f, "    {heading:<24}{description}")?,
                None => writeln!(f, "    {heading}")?,
            }
        }
        Ok(())
    }
}

/// Result of one parse pass.
///
/// Owns the registry (whose options now carry runtime values), the ordered
/// leftover tokens, and the positional bindings. All read-only queries over
/// a finished parse go through this type.
///
/// # Examples
///
/// ```
/// use optdef_core::{define, parse};
///
/// let registry = define(|d| {
///     d.option(("n", "name", "Name to greet", true));
///     d.positional("source");
/// });
///
/// let outcome = parse(registry, &["-n".into(), "Lee".into(), "in.txt".into()]).unwrap();
/// assert_eq!(outcome.value_for("name").unwrap().as_str(), Some("Lee"));
/// assert_eq!(outcome.binding("source"), Some("in.txt"));
/// assert_eq!(outcome.leftover(), ["in.txt"]);
/// ```
#[derive(Debug)]
pub struct ParseOutcome {
    registry: Registry,
    leftover: Vec<String>,
    bindings: HashMap<String, String>,
}

impl ParseOutcome {
    pub(crate) fn new(
        registry: Registry,
        leftover: Vec<String>,
        bindings: HashMap<String, String>,
    ) -> Self {
        Self {
            registry,
            leftover,
            bindings,
        }
    }

    /// The registry with updated runtime values.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Finds the declared option matching a short or long form.
    pub fn option_for(&self, name: &str) -> Option<&OptionSpec> {
        self.registry.option_for(name)
    }

    /// Resolves a name to a value.
    ///
    /// An option match is always checked first: a matching option resolves
    /// to its runtime value, which may be unset — it never falls through to
    /// a same-named positional binding. Only when no option matches is the
    /// name looked up among positional bindings.
    pub fn value_for(&self, name: &str) -> Option<Value> {
        if let Some(option) = self.registry.option_for(name) {
            return option.value().cloned();
        }
        self.bindings.get(name).map(|token| Value::from(token.clone()))
    }

    /// Non-flag tokens not consumed as option arguments, in encounter order.
    pub fn leftover(&self) -> &[String] {
        &self.leftover
    }

    /// All positional bindings.
    pub fn bindings(&self) -> &HashMap<String, String> {
        &self.bindings
    }

    /// The token bound to a declared positional name, if any.
    pub fn binding(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    /// Exports matched values keyed by canonical option name.
    ///
    /// Each entry maps an option's key to its runtime value, falling back
    /// to the declared default. Only options that require an argument or
    /// declare a default appear; presence-only flags and switches without
    /// defaults are excluded.
    pub fn exported_map(&self) -> HashMap<String, Value> {
        self.registry
            .options()
            .iter()
            .filter(|option| option.expects_argument() || option.default.is_some())
            .filter_map(|option| {
                option
                    .value_or_default()
                    .map(|value| (option.key(), value.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArgMode;

    #[test]
    fn test_option_for_is_first_match() {
        let mut registry = Registry::new();
        registry.add(OptionSpec::new(Some('n'), Some("name")).with_description("first"));
        registry.add(OptionSpec::new(None, Some("name")).with_description("second"));

        let found = registry.option_for("name").unwrap();
        assert_eq!(found.description.as_deref(), Some("first"));
    }

    #[test]
    fn test_display_lists_options_in_insertion_order() {
        let mut registry = Registry::new();
        registry.set_banner("Usage: greet [options]");
        registry.add(
            OptionSpec::new(Some('n'), Some("name"))
                .with_description("Name to greet")
                .with_mode(ArgMode::Required),
        );
        registry.add(OptionSpec::new(Some('v'), None));

        let rendered = registry.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Usage: greet [options]");
        assert!(lines[1].contains("-n, --name"));
        assert!(lines[1].contains("Name to greet"));
        assert!(lines[2].contains("-v"));
    }

    #[test]
    fn test_exported_map_excludes_presence_only_options() {
        let mut registry = Registry::new();
        registry.add(OptionSpec::new(Some('n'), Some("name")).with_mode(ArgMode::Required));
        registry.add(OptionSpec::new(Some('v'), Some("verbose")));
        registry.add(OptionSpec::new(Some('g'), Some("greeting")).with_default("Hello"));
        registry
            .option_for_mut("name")
            .unwrap()
            .set_value(Value::from("Lee"));

        let outcome = ParseOutcome::new(registry, Vec::new(), HashMap::new());
        let exported = outcome.exported_map();
        assert_eq!(exported.get("name"), Some(&Value::from("Lee")));
        assert_eq!(exported.get("greeting"), Some(&Value::from("Hello")));
        assert!(!exported.contains_key("verbose"));
    }

    #[test]
    fn test_value_for_prefers_option_over_binding() {
        let mut registry = Registry::new();
        registry.add(OptionSpec::new(None, Some("source")).with_mode(ArgMode::Required));

        let mut bindings = HashMap::new();
        bindings.insert("source".to_string(), "in.txt".to_string());
        let outcome = ParseOutcome::new(registry, Vec::new(), bindings);

        // The option matches but carries no runtime value: the binding is
        // never consulted.
        assert_eq!(outcome.value_for("source"), None);
        assert_eq!(outcome.binding("source"), Some("in.txt"));
    }
}
