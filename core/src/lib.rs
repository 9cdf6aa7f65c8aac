//! Option definitions, heuristic normalization, and token parsing.
//!
//! This crate is a small command-line option library: callers declare
//! expected flags/options, then feed a raw token list (typically process
//! arguments) to obtain structured results — matched option values, an
//! ordered list of unconsumed positional tokens, and named
//! positional-argument bindings.
//!
//! - [`OptionSpec`] — one declared flag/option with its metadata and
//!   runtime value.
//! - [`Registry`] — the insertion-ordered collection of declarations for
//!   one parsing session.
//! - [`normalize`] — the pure heuristic turning variable-arity positional
//!   registration values into a canonical `(short, long, description,
//!   mode)` tuple.
//! - [`define`] — closure-scoped builder producing a caller-owned
//!   [`Registry`].
//! - [`parse`] / [`parse_line`] — the single-pass token engine producing a
//!   [`ParseOutcome`].
//! - [`validate`] — advisory structural checks (duplicates, nameless
//!   options) that never change parse semantics.
//!
//! # Example
//!
//! ```
//! use optdef_core::{define, parse};
//!
//! let registry = define(|d| {
//!     d.banner("Usage: greet [options] <source>")
//!         .option(("n", "name", "Name to greet", true))
//!         .option(("v", "verbose", "Verbose output"))
//!         .positional("source");
//! });
//!
//! let args = vec!["-n".to_string(), "Lee".to_string(), "in.txt".to_string()];
//! let outcome = parse(registry, &args)?;
//!
//! assert_eq!(outcome.value_for("name").unwrap().as_str(), Some("Lee"));
//! assert_eq!(outcome.binding("source"), Some("in.txt"));
//! assert_eq!(outcome.leftover(), ["in.txt"]);
//! # Ok::<(), optdef_core::ParseError>(())
//! ```
//!
//! # Design notes
//!
//! The parse pass is strictly single-threaded and performs no I/O. Each
//! session owns its registry and outcome exclusively; nothing is shared
//! across sessions. Unknown flags are dropped silently and argument
//! lookahead reads the original token sequence — both are deliberate
//! compatibility behaviors, documented on [`parse`].

mod builder;
mod error;
mod normalize;
mod parse;
mod registry;
mod types;
mod validate;

pub use builder::{Builder, define};
pub use error::{ParseError, Result};
pub use normalize::{IntoSlots, NormalizedSpec, Overrides, Slot, normalize};
pub use parse::{parse, parse_line};
pub use registry::{ParseOutcome, Registry};
pub use types::{ArgMode, OptionSpec, Value};
pub use validate::{ValidationError, validate};
