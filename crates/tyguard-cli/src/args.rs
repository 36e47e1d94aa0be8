use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the tyguard binary.
#[derive(Parser, Debug)]
#[command(
    name = "tyguard",
    version,
    about = "Compile structural type documents into runtime validators"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a tyguard.json file. Defaults to the nearest one at or above
    /// the document's directory.
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the resolved compiler options instead of running the command.
    #[arg(long = "showConfig", alias = "show-config", global = true)]
    pub show_config: bool,

    /// Color the status output. Defaults to on when stderr is a terminal.
    #[arg(long, global = true)]
    pub pretty: Option<bool>,

    #[command(flatten)]
    pub options: OptionFlags,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the JavaScript validator for a type document.
    Compile {
        /// Type document (JSON).
        document: PathBuf,

        /// Write the validator to this file instead of stdout.
        #[arg(short = 'o', long = "outFile", alias = "out-file")]
        out_file: Option<PathBuf>,
    },

    /// Validate a JSON value against a type document.
    Check {
        /// Type document (JSON).
        document: PathBuf,

        /// JSON value to validate; `-` reads stdin.
        value: PathBuf,
    },

    /// List the predicate functions a document compiles to.
    Names {
        /// Type document (JSON).
        document: PathBuf,
    },
}

impl Command {
    pub fn document(&self) -> &PathBuf {
        match self {
            Self::Compile { document, .. }
            | Self::Check { document, .. }
            | Self::Names { document } => document,
        }
    }
}

/// Compiler option overrides. Each flag takes an optional boolean; a bare
/// flag means `true`.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OptionFlags {
    /// Reject objects with keys outside the declared properties.
    #[arg(
        long = "superfluousPropertyCheck",
        alias = "superfluous-property-check",
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    pub superfluous_property_check: Option<bool>,

    /// Skip method members instead of failing on them.
    #[arg(
        long = "ignoreMethods",
        alias = "ignore-methods",
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    pub ignore_methods: Option<bool>,

    /// Accept `undefined` at the root.
    #[arg(
        long = "valueMayBeAbsent",
        alias = "value-may-be-absent",
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    pub value_may_be_absent: Option<bool>,

    /// Substitute single-expression predicates at their call sites.
    #[arg(
        long = "inlineTrivialPredicates",
        alias = "inline-trivial-predicates",
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    pub inline_trivial_predicates: Option<bool>,

    /// Compile an always-true validator.
    #[arg(
        long = "shortCircuit",
        alias = "short-circuit",
        num_args = 0..=1,
        default_missing_value = "true",
        global = true
    )]
    pub short_circuit: Option<bool>,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
