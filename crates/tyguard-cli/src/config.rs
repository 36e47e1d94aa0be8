//! `tyguard.json` loading.
//!
//! ```json
//! {
//!     // comments and trailing commas are accepted
//!     "extends": "../base",
//!     "compilerOptions": { "superfluousPropertyCheck": true }
//! }
//! ```

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use tyguard_compiler::CompileOptions;

use crate::args::OptionFlags;

pub const CONFIG_FILE_NAME: &str = "tyguard.json";

/// Boolean options accept `true` as well as `"true"`, `"on"`, `"1"`, ...
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TyguardConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

/// The `compilerOptions` object; unset keys fall through to the base
/// config and then to [`CompileOptions::default`].
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub superfluous_property_check: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub ignore_methods: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub value_may_be_absent: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub inline_trivial_predicates: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub short_circuit: Option<bool>,
}

impl CompilerOptions {
    /// Keys set in `self` win over `base`.
    pub fn merge(self, base: Self) -> Self {
        Self {
            superfluous_property_check: self
                .superfluous_property_check
                .or(base.superfluous_property_check),
            ignore_methods: self.ignore_methods.or(base.ignore_methods),
            value_may_be_absent: self.value_may_be_absent.or(base.value_may_be_absent),
            inline_trivial_predicates: self
                .inline_trivial_predicates
                .or(base.inline_trivial_predicates),
            short_circuit: self.short_circuit.or(base.short_circuit),
        }
    }

    pub fn apply(self, mut options: CompileOptions) -> CompileOptions {
        if let Some(value) = self.superfluous_property_check {
            options.superfluous_property_check = value;
        }
        if let Some(value) = self.ignore_methods {
            options.ignore_methods = value;
        }
        if let Some(value) = self.value_may_be_absent {
            options.value_may_be_absent = value;
        }
        if let Some(value) = self.inline_trivial_predicates {
            options.inline_trivial_predicates = value;
        }
        if let Some(value) = self.short_circuit {
            options.short_circuit = value;
        }
        options
    }
}

impl From<OptionFlags> for CompilerOptions {
    fn from(flags: OptionFlags) -> Self {
        Self {
            superfluous_property_check: flags.superfluous_property_check,
            ignore_methods: flags.ignore_methods,
            value_may_be_absent: flags.value_may_be_absent,
            inline_trivial_predicates: flags.inline_trivial_predicates,
            short_circuit: flags.short_circuit,
        }
    }
}

pub fn parse_config(source: &str) -> Result<TyguardConfig> {
    let normalized = strip_jsonc(source);
    let config = serde_json::from_str(&normalized).context("failed to parse tyguard.json")?;
    Ok(config)
}

/// Load `path`, following `extends` chains.
pub fn load_config(path: &Path) -> Result<TyguardConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<TyguardConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("tyguard.json extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_config_inner(&base_path, visited)?;
        config.compiler_options = match (config.compiler_options, base.compiler_options) {
            (Some(own), Some(base)) => Some(own.merge(base)),
            (own, base) => own.or(base),
        };
    }

    visited.remove(&canonical);
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("tyguard.json has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    Ok(if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    })
}

/// Nearest `tyguard.json` in the document's directory or any ancestor.
pub fn find_config(document: &Path) -> Option<PathBuf> {
    let start = document.parent()?;
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Options for compiling `document`: defaults, then the config file
/// (explicit or discovered), then command-line flags.
pub fn resolve_options(
    document: &Path,
    config: Option<&Path>,
    flags: OptionFlags,
) -> Result<CompileOptions> {
    let config_path = match config {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(document),
    };
    let from_file = match config_path {
        Some(path) => load_config(&path)?.compiler_options.unwrap_or_default(),
        None => CompilerOptions::default(),
    };
    Ok(CompilerOptions::from(flags)
        .merge(from_file)
        .apply(CompileOptions::default()))
}

/// Drop `//` and `/* */` comments and trailing commas so `serde_json` can
/// read the file.
fn strip_jsonc(input: &str) -> String {
    remove_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let mut lookahead = chars.clone();
            while lookahead.peek().is_some_and(|c| c.is_whitespace()) {
                lookahead.next();
            }
            if matches!(lookahead.peek(), Some('}' | ']')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
