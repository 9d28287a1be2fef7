//! Configuration for Refold.
//!
//! Configuration is read from an optional `refold.toml`. Every field has a default, so an empty
//! file (or no file at all) yields [`RefoldConfig::default`].
//!
//! ```toml
//! [accessors]
//! get_prefixes = ["Get"]
//! set_prefixes = ["Set"]
//!
//! [formatting]
//! indent_width = 4
//! use_tabs = false
//!
//! [logging]
//! level = "info"
//! json = false
//! ```
//!
//! The library crates only emit `tracing` events. Hosts call [`init_tracing`] once at startup
//! with [`RefoldConfig::logging`] to get them on stderr.

use std::path::Path;
use std::sync::Once;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::prelude::*;

mod diagnostics;
mod validation;

pub use diagnostics::{ConfigDiagnostics, ConfigValidationError, ConfigWarning};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefoldConfig {
    /// Naming conventions recognised by "replace method with property".
    pub accessors: AccessorConfig,
    /// Layout used when a refactoring synthesizes new blocks.
    pub formatting: FormattingConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorConfig {
    /// Prefixes that mark a method as a getter (`GetFoo` -> `Foo`).
    pub get_prefixes: Vec<String>,
    /// Prefixes that mark a method as a setter (`SetFoo` -> `Foo`).
    pub set_prefixes: Vec<String>,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        Self {
            get_prefixes: vec!["Get".to_owned()],
            set_prefixes: vec!["Set".to_owned()],
        }
    }
}

impl AccessorConfig {
    /// Splits `name` into `(prefix, property name)` using the first matching get prefix.
    ///
    /// The remainder must be non-empty, so `Get` alone is never a getter.
    pub fn strip_get_prefix<'a>(&self, name: &'a str) -> Option<(&str, &'a str)> {
        strip_any_prefix(&self.get_prefixes, name)
    }

    /// Candidate setter names for a property, one per configured set prefix.
    pub fn setter_names(&self, property: &str) -> Vec<String> {
        self.set_prefixes
            .iter()
            .map(|prefix| format!("{prefix}{property}"))
            .collect()
    }
}

fn strip_any_prefix<'p, 'a>(prefixes: &'p [String], name: &'a str) -> Option<(&'p str, &'a str)> {
    prefixes.iter().find_map(|prefix| {
        name.strip_prefix(prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .map(|rest| (prefix.as_str(), rest))
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    /// Width of one indentation level, in columns.
    pub indent_width: usize,
    /// Indent with a single tab per level instead of spaces.
    pub use_tabs: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            use_tabs: false,
        }
    }
}

impl FormattingConfig {
    /// The text of one indentation level.
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_owned()
        } else {
            " ".repeat(self.indent_width)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Either a simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    pub level: String,
    /// Emit JSON lines instead of human readable text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective `EnvFilter`. If `RUST_LOG` is set, its directives are merged in after the
    /// configured ones.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // `Display` embeds a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl RefoldConfig {
    /// Parse a config from TOML text.
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read_config_file(path.as_ref())?;
        Self::load_from_str(&text)
    }

    /// Parse a config from TOML text and report unknown keys and validation failures.
    ///
    /// Diagnostics never turn into an `Err`; only unreadable or malformed TOML does.
    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<RefoldConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.extend_validation(config.validate_all());

        if !diagnostics.unknown_keys.is_empty() {
            tracing::debug!(
                target: "refold.config",
                unknown_keys = ?diagnostics.unknown_keys,
                "config contains unknown keys"
            );
        }
        Ok((config, diagnostics))
    }

    /// Like [`RefoldConfig::load_from_str_with_diagnostics`] but reads from disk.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let text = read_config_file(path.as_ref())?;
        Self::load_from_str_with_diagnostics(&text)
    }
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

static TRACING_INIT: Once = Once::new();

/// Install a global `tracing` subscriber writing to stderr.
///
/// Meant for the host binary or test harness; nothing in the Refold crates calls it.
///
/// Only the first call has an effect; later calls (and calls after another subscriber was
/// installed) are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        // `TestWriter` keeps `cargo test` output captured in debug builds.
        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = match (
            config.json,
            cfg!(debug_assertions),
        ) {
            (true, true) => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
                .with_ansi(false)
                .boxed(),
            (true, false) => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed(),
            (false, true) => tracing_subscriber::fmt::layer()
                .with_writer(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
                .with_ansi(false)
                .boxed(),
            (false, false) => tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed(),
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(target: "refold.config", json = config.json, "tracing initialized");
        }
    });
}
