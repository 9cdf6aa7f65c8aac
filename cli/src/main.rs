//! Command-line front end for optdef option definitions.
//!
//! Usage:
//!
//! ```text
//! optdef <definitions.json> [token...]
//! optdef --show <definitions.json>
//! ```
//!
//! The definitions file declares options and positional names; the
//! remaining arguments are parsed against them and the result is printed
//! as a JSON summary (exported values, leftover tokens, positional
//! bindings). `--show` renders the declared options as help text instead.
//!
//! The binary's own argument handling is deliberately positional: the
//! library it ships is the option parser.

use std::collections::BTreeMap;
use std::fs;
use std::process::ExitCode;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use optdef_core::{ArgMode, OptionSpec, ParseOutcome, Registry, Value, parse, validate};

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: optdef [--show] <definitions.json> [token...]")]
    Usage,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid definitions: {0}")]
    Definitions(String),

    #[error(transparent)]
    Parse(#[from] optdef_core::ParseError),
}

/// On-disk definition file format.
#[derive(Debug, Deserialize)]
struct DefinitionsFile {
    #[serde(default)]
    banner: Option<String>,
    #[serde(default)]
    options: Vec<OptionEntry>,
    #[serde(default)]
    positional: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionEntry {
    #[serde(default)]
    short: Option<String>,
    #[serde(default)]
    long: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    mode: Option<ArgMode>,
    #[serde(default)]
    switch: bool,
    #[serde(default)]
    default: Option<Value>,
}

/// JSON summary printed after a successful parse.
#[derive(Debug, Serialize)]
struct ParseSummary {
    values: BTreeMap<String, Value>,
    leftover: Vec<String>,
    bindings: BTreeMap<String, String>,
}

impl From<&ParseOutcome> for ParseSummary {
    fn from(outcome: &ParseOutcome) -> Self {
        Self {
            values: outcome.exported_map().into_iter().collect(),
            leftover: outcome.leftover().to_vec(),
            bindings: outcome
                .bindings()
                .iter()
                .map(|(name, token)| (name.clone(), token.clone()))
                .collect(),
        }
    }
}

fn load_registry(path: &str) -> Result<Registry, CliError> {
    let raw = fs::read_to_string(path)?;
    let file: DefinitionsFile = serde_json::from_str(&raw)?;

    let mut registry = Registry::new();
    if let Some(banner) = &file.banner {
        registry.set_banner(banner);
    }
    for entry in file.options {
        let short = match &entry.short {
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(CliError::Definitions(format!(
                            "short form must be exactly one character: {s:?}"
                        )));
                    }
                }
            }
            None => None,
        };
        let mut spec = OptionSpec::new(short, entry.long.as_deref());
        if let Some(description) = &entry.description {
            spec = spec.with_description(description);
        }
        if let Some(mode) = entry.mode {
            spec = spec.with_mode(mode);
        }
        if entry.switch {
            spec = spec.as_switch();
        }
        if let Some(default) = entry.default {
            spec = spec.with_default(default);
        }
        registry.add(spec);
    }
    for name in &file.positional {
        registry.add_positional(name);
    }

    let problems = validate(&registry);
    if !problems.is_empty() {
        let joined = problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CliError::Definitions(joined));
    }
    Ok(registry)
}

fn run(args: &[String]) -> Result<String, CliError> {
    match args {
        [] => Err(CliError::Usage),
        [flag, path] if flag == "--show" => {
            let registry = load_registry(path)?;
            Ok(registry.to_string().trim_end().to_string())
        }
        [path, tokens @ ..] => {
            let registry = load_registry(path)?;
            let outcome = parse(registry, tokens)?;
            let summary = ParseSummary::from(&outcome);
            Ok(serde_json::to_string_pretty(&summary)?)
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
