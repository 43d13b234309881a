use crate::tracing_config::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the gqlmap binary.
#[derive(Parser, Debug)]
#[command(
    name = "gqlmap",
    version,
    about = "Resolve classes to GraphQL types through their inheritance chain"
)]
pub struct CliArgs {
    /// Path to the mapping manifest (JSON).
    #[arg(short = 'm', long)]
    pub manifest: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Log output format (overrides GQLMAP_LOG_FORMAT). Logging is enabled by GQLMAP_LOG.
    #[arg(long, value_enum, ignore_case = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Object type for a class, falling back to its closest mapped ancestor.
    Resolve {
        /// Fully qualified class name.
        class: String,
    },
    /// Input type for a class (exact match only).
    Input { class: String },
    /// Interface types implemented by a class.
    Interfaces { class: String },
    /// Interface or object type that best represents a class in output position.
    #[command(name = "interface-or-type", alias = "interface_or_type")]
    InterfaceOrType { class: String },
    /// Print every type reachable from the mapped classes as SDL.
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// GraphQL SDL.
    #[default]
    Text,
    /// JSON summary.
    Json,
}
