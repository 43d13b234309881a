//! Logging setup for the `gqlmap` binary.
//!
//! Filter directives come from `GQLMAP_LOG`, falling back to `RUST_LOG`;
//! without either, no subscriber is installed. The output format is taken
//! from `--log-format`, then `GQLMAP_LOG_FORMAT`, then defaults to text.
//!
//! ```bash
//! GQLMAP_LOG=gqlmap_mapper=trace gqlmap -m mapping.json resolve 'App\Post'
//! GQLMAP_LOG=debug gqlmap --log-format tree -m mapping.json schema
//! ```
//!
//! Events go to stderr; stdout carries only command output.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "GQLMAP_LOG";
const LOG_FORMAT_VAR: &str = "GQLMAP_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// One line per event.
    #[default]
    Text,
    /// Indented by span, via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "tree" => Some(Self::Tree),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives; `None` disables logging.
    pub directives: Option<String>,
    pub format: LogFormat,
}

impl LogConfig {
    /// Read the environment, letting `cli_format` override it.
    pub fn resolve(cli_format: Option<LogFormat>) -> Self {
        let directives = std::env::var(LOG_VAR)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();
        let env_format = std::env::var(LOG_FORMAT_VAR).ok();
        Self::from_parts(directives, env_format.as_deref(), cli_format)
    }

    pub fn from_parts(
        directives: Option<String>,
        env_format: Option<&str>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let format = cli_format
            .or_else(|| env_format.and_then(LogFormat::from_name))
            .unwrap_or_default();
        Self {
            directives: directives.filter(|d| !d.trim().is_empty()),
            format,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.directives.is_some()
    }

    /// Install the global subscriber. Returns `false` when logging is disabled
    /// or another subscriber is already installed.
    pub fn install(&self) -> bool {
        let Some(directives) = &self.directives else {
            return false;
        };
        let filter = EnvFilter::builder().parse_lossy(directives);

        match self.format {
            LogFormat::Text => {
                let layer = fmt::layer().with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).try_init().is_ok()
            }
            LogFormat::Tree => {
                let layer = tracing_tree::HierarchicalLayer::new(2)
                    .with_indent_lines(true)
                    .with_targets(true);
                Registry::default().with(filter).with(layer).try_init().is_ok()
            }
            LogFormat::Json => {
                let layer = fmt::layer().json().with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).try_init().is_ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(LogFormat::from_name(" TREE "), Some(LogFormat::Tree));
        assert_eq!(LogFormat::from_name("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::from_name("pretty"), None);
    }

    #[test]
    fn test_command_line_format_wins() {
        let config = LogConfig::from_parts(
            Some("debug".to_string()),
            Some("json"),
            Some(LogFormat::Tree),
        );
        assert_eq!(config.format, LogFormat::Tree);
        assert!(config.is_enabled());

        let config = LogConfig::from_parts(Some("debug".to_string()), Some("json"), None);
        assert_eq!(config.format, LogFormat::Json);

        let config = LogConfig::from_parts(Some("debug".to_string()), Some("pretty"), None);
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn test_disabled_without_directives() {
        let config = LogConfig::from_parts(None, Some("tree"), None);
        assert!(!config.is_enabled());
        assert!(!config.install());

        let blank = LogConfig::from_parts(Some("  ".to_string()), None, None);
        assert!(!blank.is_enabled());
    }
}
