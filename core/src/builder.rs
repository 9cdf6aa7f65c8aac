//! Closure-scoped registration builder.
//!
//! Options are declared against an explicit [`Builder`] receiver passed
//! into a configuration closure. Every call to [`define`] produces a fresh
//! caller-owned [`Registry`]; no registration state outlives the closure or
//! is shared between sessions.

use crate::normalize::{IntoSlots, Overrides, normalize};
use crate::registry::Registry;

/// Registration receiver handed to the [`define`] closure.
///
/// # Examples
///
/// ```
/// use optdef_core::{ArgMode, Overrides, define};
///
/// let registry = define(|d| {
///     d.banner("Usage: copy [options] <source> <dest>")
///         .option(("n", "name", "Name to greet", true))
///         .option(("v", "verbose", "Verbose output"))
///         .option_with(
///             ("o", "output"),
///             Overrides::default().mode(ArgMode::Optional).default_value("out.txt"),
///         )
///         .positional("source")
///         .positional("dest");
/// });
///
/// assert_eq!(registry.options().len(), 3);
/// assert_eq!(registry.positional_names(), ["source", "dest"]);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    registry: Registry,
}

impl Builder {
    /// Sets the banner line for registry display.
    pub fn banner(&mut self, text: &str) -> &mut Self {
        self.registry.set_banner(text);
        self
    }

    /// Declares an option from positional values alone.
    pub fn option(&mut self, slots: impl IntoSlots) -> &mut Self {
        self.register(slots, Overrides::default(), None)
    }

    /// Declares an option from positional values plus explicit overrides.
    pub fn option_with(&mut self, slots: impl IntoSlots, overrides: Overrides) -> &mut Self {
        self.register(slots, overrides, None)
    }

    /// Declares an option with an on-match callback, invoked the instant
    /// the flag is recognized during parsing.
    pub fn on(&mut self, slots: impl IntoSlots, callback: impl FnMut() + 'static) -> &mut Self {
        self.register(slots, Overrides::default(), Some(Box::new(callback)))
    }

    /// Declares a named positional argument; names bind front-to-back to
    /// the non-flag tokens encountered during parsing.
    pub fn positional(&mut self, name: &str) -> &mut Self {
        self.registry.add_positional(name);
        self
    }

    fn register(
        &mut self,
        slots: impl IntoSlots,
        overrides: Overrides,
        callback: Option<Box<dyn FnMut()>>,
    ) -> &mut Self {
        let mut spec = normalize(&slots.into_slots()).apply(&overrides).into_spec();
        if let Some(default) = overrides.default {
            spec = spec.with_default(default);
        }
        if overrides.switch == Some(true) {
            spec = spec.as_switch();
        }
        if let Some(callback) = callback {
            spec = spec.with_callback(callback);
        }
        self.registry.add(spec);
        self
    }
}

/// Builds a registry by running registrations against an explicit builder.
///
/// # Examples
///
/// ```
/// use optdef_core::define;
///
/// let registry = define(|d| {
///     d.option(("n", "name", true));
/// });
/// assert!(registry.option_for("name").is_some());
/// ```
pub fn define(configure: impl FnOnce(&mut Builder)) -> Registry {
    let mut builder = Builder::default();
    configure(&mut builder);
    builder.registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArgMode, Value};

    #[test]
    fn test_define_builds_fresh_registry_per_session() {
        let first = define(|d| {
            d.option(("a", "alpha"));
        });
        let second = define(|d| {
            d.option(("b", "beta"));
        });
        assert!(first.option_for("alpha").is_some());
        assert!(first.option_for("beta").is_none());
        assert!(second.option_for("beta").is_some());
    }

    #[test]
    fn test_option_infers_roles_from_slots() {
        let registry = define(|d| {
            d.option(("n", "name", "Name to greet", true));
        });
        let option = registry.option_for("name").unwrap();
        assert_eq!(option.short, Some('n'));
        assert_eq!(option.description.as_deref(), Some("Name to greet"));
        assert_eq!(option.mode, ArgMode::Required);
    }

    #[test]
    fn test_option_with_applies_overrides_and_extras() {
        let registry = define(|d| {
            d.option_with(
                ("g", "greeting", true),
                Overrides::default()
                    .mode(ArgMode::Optional)
                    .default_value("Hello")
                    .switch(false),
            );
        });
        let option = registry.option_for("greeting").unwrap();
        assert_eq!(option.mode, ArgMode::Optional);
        assert_eq!(option.default, Some(Value::from("Hello")));
        assert!(!option.switch);
    }

    #[test]
    fn test_positional_names_keep_declaration_order() {
        let registry = define(|d| {
            d.positional("source").positional("dest");
        });
        assert_eq!(registry.positional_names(), ["source", "dest"]);
    }
}
