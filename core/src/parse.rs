//! Single-pass token parsing.
//!
//! The engine walks the raw token list once, left to right, classifying
//! each token as flag-like or positional and resolving how many following
//! tokens a flag consumes. Consumed argument tokens are skipped with an
//! explicit cursor (a countdown of slots still to skip), never by index
//! arithmetic against a mutated list, so the lookahead always reads the
//! original token sequence.
//!
//! Two behaviors are deliberate compatibility choices rather than bugs:
//!
//! - A flag-like token with no matching option is dropped silently. It
//!   contributes to neither the leftover list nor any binding; the drop is
//!   logged at debug level.
//! - The argument lookahead inspects the token at the *original* index
//!   following the flag, even though that token may itself look like a
//!   flag (in which case it is not consumed).
//!
//! Callers wanting stricter behavior must inspect the
//! [`ParseOutcome`](crate::ParseOutcome), not rely on errors: the only
//! error raised is a required-mode option with no usable argument.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::registry::{ParseOutcome, Registry};
use crate::types::{ArgMode, Value};

/// Classifies a raw token as flag-like.
///
/// Counted in characters, not bytes:
///
/// - fewer than two characters is never flag-like;
/// - a `-` in the second position is long-flag-like only with at least
///   four characters (`--x` is *not* a long flag — the asymmetry is
///   intentional and preserved);
/// - otherwise a leading `-` is short-flag-like only up to three
///   characters.
pub(crate) fn is_flag_like(token: &str) -> bool {
    let mut chars = token.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return false;
    };
    // chars now positioned at index 2; two more steps tell us whether a
    // character exists at position 3.
    let has_fourth = chars.nth(1).is_some();
    if second == '-' {
        return has_fourth;
    }
    if first == '-' {
        return !has_fourth;
    }
    false
}

/// Extracts the flag name from a flag-like token: the single character of
/// a two-character token, else everything past the leading two characters.
pub(crate) fn flag_name(token: &str) -> String {
    if token.chars().count() == 2 {
        token.chars().nth(1).map(String::from).unwrap_or_default()
    } else {
        token.chars().skip(2).collect()
    }
}

/// Parses a raw token list against a registry.
///
/// Consumes the registry and returns a [`ParseOutcome`] owning it, with
/// runtime values written into the matched options, leftover tokens in
/// encounter order, and positional bindings assigned front-to-back from
/// the declared names.
///
/// # Errors
///
/// [`ParseError::MissingCompulsoryArgument`] when a required-mode option
/// is matched but the following token is absent or itself flag-like. The
/// in-progress parse is aborted; no partial result is returned.
///
/// # Examples
///
/// ```
/// use optdef_core::{define, parse};
///
/// let registry = define(|d| {
///     d.option(("n", "name", "Name to greet", true));
///     d.option(("v", "verbose", "Verbose output"));
/// });
///
/// let tokens = vec!["-n".to_string(), "Lee".to_string(), "file.txt".to_string()];
/// let outcome = parse(registry, &tokens).unwrap();
/// assert_eq!(outcome.value_for("name").unwrap().as_str(), Some("Lee"));
/// assert_eq!(outcome.leftover(), ["file.txt"]);
/// ```
pub fn parse(mut registry: Registry, tokens: &[String]) -> Result<ParseOutcome> {
    let mut pending: VecDeque<String> = registry.positional_names().to_vec().into();
    let mut leftover: Vec<String> = Vec::new();
    let mut bindings: HashMap<String, String> = HashMap::new();
    let mut skip = 0usize;

    for (index, token) in tokens.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            continue;
        }

        if !is_flag_like(token) {
            leftover.push(token.clone());
            if let Some(name) = pending.pop_front() {
                bindings.insert(name, token.clone());
            }
            continue;
        }

        let name = flag_name(token);
        let Some(option) = registry.option_for_mut(&name) else {
            debug!(token = %token, "dropping unrecognized flag");
            continue;
        };

        option.notify_matched();
        if option.switch {
            option.toggle();
        }

        match option.mode {
            ArgMode::None => {
                if !option.switch {
                    option.set_value(Value::Flag(true));
                }
            }
            ArgMode::Required | ArgMode::Optional => {
                // Lookahead against the original token sequence.
                let next = tokens.get(index + 1);
                match next {
                    Some(argument) if !is_flag_like(argument) => {
                        debug!(flag = %name, argument = %argument, "consumed argument");
                        option.set_value(Value::Text(argument.clone()));
                        skip = 1;
                    }
                    _ if option.mode == ArgMode::Required => {
                        return Err(ParseError::MissingCompulsoryArgument {
                            key: option.key(),
                        });
                    }
                    _ => {
                        // Optional with no usable argument: no value, and
                        // the following token is left in the stream.
                    }
                }
            }
        }
    }

    Ok(ParseOutcome::new(registry, leftover, bindings))
}

/// Splits a single string on runs of whitespace and parses the pieces.
///
/// # Examples
///
/// ```
/// use optdef_core::{define, parse_line};
///
/// let registry = define(|d| {
///     d.option(("n", "name", true));
/// });
///
/// let outcome = parse_line(registry, "-n Lee  extra").unwrap();
/// assert_eq!(outcome.value_for("name").unwrap().as_str(), Some("Lee"));
/// assert_eq!(outcome.leftover(), ["extra"]);
/// ```
pub fn parse_line(registry: Registry, line: &str) -> Result<ParseOutcome> {
    let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
    parse(registry, &tokens)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::builder::define;
    use crate::types::OptionSpec;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_is_flag_like_boundaries() {
        assert!(!is_flag_like(""));
        assert!(!is_flag_like("-"));
        assert!(is_flag_like("-n"));
        assert!(is_flag_like("-ab"));
        assert!(!is_flag_like("-abcd"));
        // `--x` has no character at position 3 and is not a long flag.
        assert!(!is_flag_like("--x"));
        assert!(is_flag_like("--xx"));
        assert!(is_flag_like("--verbose"));
        assert!(!is_flag_like("plain"));
        assert!(!is_flag_like("a-b"));
    }

    #[test]
    fn test_flag_name_extraction() {
        assert_eq!(flag_name("-n"), "n");
        assert_eq!(flag_name("--name"), "name");
        // Three-character single-dash tokens keep only what follows the
        // first two characters.
        assert_eq!(flag_name("-ab"), "b");
    }

    #[test]
    fn test_required_option_consumes_following_token() {
        let registry = define(|d| {
            d.option(("n", true));
        });
        let outcome = parse(registry, &tokens(&["-n", "Lee"])).unwrap();
        assert_eq!(outcome.value_for("n").unwrap().as_str(), Some("Lee"));
        assert!(outcome.leftover().is_empty());
    }

    #[test]
    fn test_required_option_without_argument_fails() {
        let registry = define(|d| {
            d.option(("n", true));
        });
        let err = parse(registry, &tokens(&["-n"])).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingCompulsoryArgument { ref key } if key == "n"
        ));
    }

    #[test]
    fn test_required_option_rejects_flag_like_argument() {
        let registry = define(|d| {
            d.option(("n", "name", true));
        });
        let err = parse(registry, &tokens(&["--name", "--oops"])).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingCompulsoryArgument { ref key } if key == "name"
        ));
    }

    #[test]
    fn test_presence_flag_sets_true_and_leaves_token() {
        let registry = define(|d| {
            d.option(("verbose", "Verbose output"));
        });
        let outcome = parse(registry, &tokens(&["--verbose", "file.txt"])).unwrap();
        assert_eq!(outcome.value_for("verbose"), Some(Value::Flag(true)));
        assert_eq!(outcome.leftover(), ["file.txt"]);
    }

    #[test]
    fn test_unknown_flag_is_dropped_silently() {
        let registry = define(|_| {});
        let outcome = parse(registry, &tokens(&["-x", "a"])).unwrap();
        assert_eq!(outcome.leftover(), ["a"]);
        assert!(outcome.bindings().is_empty());
        assert_eq!(outcome.value_for("x"), None);
    }

    #[test]
    fn test_unknown_flag_never_binds_positionals() {
        let registry = define(|d| {
            d.positional("source");
        });
        let outcome = parse(registry, &tokens(&["-x", "in.txt"])).unwrap();
        assert_eq!(outcome.binding("source"), Some("in.txt"));
        assert_eq!(outcome.leftover(), ["in.txt"]);
    }

    #[test]
    fn test_positional_bindings_in_declaration_order() {
        let registry = define(|d| {
            d.positional("source");
            d.positional("dest");
        });
        let outcome = parse(registry, &tokens(&["in.txt", "out.txt", "extra"])).unwrap();
        assert_eq!(outcome.binding("source"), Some("in.txt"));
        assert_eq!(outcome.binding("dest"), Some("out.txt"));
        assert_eq!(outcome.binding("extra"), None);
        // Excess non-flag tokens still appear in the leftover list.
        assert_eq!(outcome.leftover(), ["in.txt", "out.txt", "extra"]);
    }

    #[test]
    fn test_consumed_argument_never_reaches_leftover_or_bindings() {
        let registry = define(|d| {
            d.option(("n", "name", true));
            d.positional("source");
        });
        let outcome = parse(registry, &tokens(&["-n", "Lee", "in.txt"])).unwrap();
        assert_eq!(outcome.value_for("name").unwrap().as_str(), Some("Lee"));
        assert_eq!(outcome.binding("source"), Some("in.txt"));
        assert_eq!(outcome.leftover(), ["in.txt"]);
    }

    #[test]
    fn test_optional_mode_skips_flag_like_argument() {
        let registry = define(|d| {
            d.option_with(("o", "output"), crate::Overrides::default().mode(ArgMode::Optional));
            d.option(("v", "verbose"));
        });
        let outcome = parse(registry, &tokens(&["-o", "--verbose"])).unwrap();
        assert_eq!(outcome.value_for("output"), None);
        assert_eq!(outcome.value_for("verbose"), Some(Value::Flag(true)));
    }

    #[test]
    fn test_optional_mode_consumes_plain_argument() {
        let registry = define(|d| {
            d.option_with(("o", "output"), crate::Overrides::default().mode(ArgMode::Optional));
        });
        let outcome = parse(registry, &tokens(&["-o", "out.txt"])).unwrap();
        assert_eq!(outcome.value_for("output").unwrap().as_str(), Some("out.txt"));
        assert!(outcome.leftover().is_empty());
    }

    #[test]
    fn test_switch_toggles_from_default() {
        let registry = define(|d| {
            d.option_with(
                ("q", "quiet"),
                crate::Overrides::default().switch(true).default_value(true),
            );
        });
        let outcome = parse(registry, &tokens(&["--quiet"])).unwrap();
        assert_eq!(outcome.value_for("quiet"), Some(Value::Flag(false)));
    }

    #[test]
    fn test_switch_without_default_toggles_to_true() {
        let registry = define(|d| {
            d.option_with(("q", "quiet"), crate::Overrides::default().switch(true));
        });
        let outcome = parse(registry, &tokens(&["-q"])).unwrap();
        assert_eq!(outcome.value_for("quiet"), Some(Value::Flag(true)));
    }

    #[test]
    fn test_callback_runs_on_every_match() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let registry = define(move |d| {
            d.on(("v", "verbose"), move || seen.set(seen.get() + 1));
        });
        let outcome = parse(registry, &tokens(&["-v", "--verbose"])).unwrap();
        assert_eq!(count.get(), 2);
        assert_eq!(outcome.value_for("verbose"), Some(Value::Flag(true)));
    }

    #[test]
    fn test_repeated_flag_overwrites_value() {
        let registry = define(|d| {
            d.option(("n", "name", true));
        });
        let outcome = parse(registry, &tokens(&["-n", "Lee", "-n", "Kim"])).unwrap();
        assert_eq!(outcome.value_for("name").unwrap().as_str(), Some("Kim"));
        assert!(outcome.leftover().is_empty());
    }

    #[test]
    fn test_three_char_long_token_is_positional() {
        let registry = define(|d| {
            d.option(("x", "xx"));
        });
        // `--x` is below the long-flag length threshold and stays a
        // positional token.
        let outcome = parse(registry, &tokens(&["--x"])).unwrap();
        assert_eq!(outcome.leftover(), ["--x"]);
        assert_eq!(outcome.value_for("x"), None);
    }

    #[test]
    fn test_three_char_short_token_matches_trailing_character() {
        let registry = define(|d| {
            d.option(("b", "Trailing short form"));
        });
        let outcome = parse(registry, &tokens(&["-ab"])).unwrap();
        assert_eq!(outcome.value_for("b"), Some(Value::Flag(true)));
    }

    #[test]
    fn test_parse_line_splits_on_whitespace_runs() {
        let registry = define(|d| {
            d.option(("n", "name", true));
        });
        let outcome = parse_line(registry, "  -n   Lee \t extra ").unwrap();
        assert_eq!(outcome.value_for("name").unwrap().as_str(), Some("Lee"));
        assert_eq!(outcome.leftover(), ["extra"]);
    }

    #[test]
    fn test_parse_empty_input_is_valid() {
        let mut registry = Registry::new();
        registry.add(OptionSpec::new(Some('v'), None));
        let outcome = parse(registry, &[]).unwrap();
        assert!(outcome.leftover().is_empty());
        assert_eq!(outcome.value_for("v"), None);
    }
}
