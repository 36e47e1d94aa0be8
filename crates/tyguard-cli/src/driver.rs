//! Command execution, separated from process I/O so it can be tested.

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use tracing::{debug, info_span};
use tyguard_compiler::{CompileError, CompileOptions, Validator, compile_validator};
use tyguard_emitter::{JsPrinter, emit_validator};
use tyguard_runtime::{Value, assert};
use tyguard_types::{TypeInterner, lower_json};

use crate::args::{CliArgs, Command};
use crate::config::resolve_options;
use crate::reporter::Reporter;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VALIDATION_FAILED: i32 = 1;
pub const EXIT_COMPILE_FAILED: i32 = 2;

/// What a command printed and the status the process should exit with.
#[derive(Debug, Default)]
pub struct Output {
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

impl Output {
    fn stdout(text: String) -> Self {
        Self {
            stdout: text,
            ..Self::default()
        }
    }
}

pub fn run(args: &CliArgs, color: bool) -> Result<Output> {
    let document = args.command.document();
    let _span = info_span!("run", document = %document.display()).entered();
    let reporter = Reporter::new(color);

    let options = resolve_options(document, args.config.as_deref(), args.options)?;
    debug!(?options, "resolved compiler options");
    if args.show_config {
        let text = serde_json::to_string_pretty(&json!({ "compilerOptions": options }))?;
        return Ok(Output::stdout(format!("{text}\n")));
    }

    let validator = match compile_document(document, options)? {
        Ok(validator) => validator,
        Err(error) => {
            return Ok(Output {
                stderr: format!("{}\n", reporter.compile_failure(&error)),
                status: EXIT_COMPILE_FAILED,
                ..Output::default()
            });
        }
    };

    match &args.command {
        Command::Compile { out_file, .. } => {
            let source = emit_validator(&validator);
            match out_file {
                Some(path) => {
                    std::fs::write(path, format!("{source}\n"))
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    debug!(path = %path.display(), "wrote validator");
                    Ok(Output::default())
                }
                None => Ok(Output::stdout(format!("{source}\n"))),
            }
        }
        Command::Check { value, .. } => {
            let value = read_value(value)?;
            match assert(&validator, &value) {
                Ok(()) => Ok(Output::stdout(format!("{}\n", reporter.passed()))),
                Err(error) => Ok(Output {
                    stdout: format!("{}\n", serde_json::to_string_pretty(&error)?),
                    stderr: format!("{}\n", reporter.validation_failure(&error)),
                    status: EXIT_VALIDATION_FAILED,
                }),
            }
        }
        Command::Names { .. } => Ok(Output::stdout(
            reporter.names(&JsPrinter::identifiers(&validator)),
        )),
    }
}

/// Read, lower and compile a type document. The outer error covers I/O and
/// malformed documents; the inner one is a type the compiler rejects.
pub fn compile_document(
    path: &Path,
    options: CompileOptions,
) -> Result<Result<Validator, CompileError>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read type document: {}", path.display()))?;
    let mut types = TypeInterner::new();
    let root = lower_json(&mut types, &text)
        .with_context(|| format!("invalid type document: {}", path.display()))?;
    Ok(compile_validator(&types, root, options))
}

fn read_value(path: &Path) -> Result<Value> {
    let text = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read value from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read value: {}", path.display()))?
    };
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("value is not valid JSON: {}", path.display()))?;
    Ok(Value::from(json))
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
