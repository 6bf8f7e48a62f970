//! Configuration for vireo tools.
//!
//! Configuration is read from `vireo.toml` (or `.vireo.toml`) at the workspace root:
//!
//! ```toml
//! [logging]
//! level = "debug"
//! json = false
//!
//! [overrides]
//! compare_type_arguments = false
//! match_setters = false
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use std::path::{Path, PathBuf};
use std::sync::Once;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::prelude::*;
use vireo_override::OverrideOptions;

/// File names probed by [`discover_config_path`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["vireo.toml", ".vireo.toml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct VireoConfig {
    /// Global logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Override matching behavior.
    #[serde(default)]
    pub overrides: OverrideConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "warn".to_owned()
    }

    fn default_stderr() -> bool {
        true
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
            "off" | "none" => "off".to_owned(),
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        })
    }

    /// The effective filter: the configured level, merged with `RUST_LOG` when set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        match env_directives {
            Some(env_directives) => {
                let config_directives = Self::normalize_level_directives(&self.level);
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct OverrideConfig {
    /// Require equal type arguments when two class types share an identity.
    #[serde(default)]
    pub compare_type_arguments: bool,

    /// Match one-parameter functions against mutable properties as setters.
    #[serde(default)]
    pub match_setters: bool,
}

impl From<OverrideConfig> for OverrideOptions {
    fn from(config: OverrideConfig) -> Self {
        OverrideOptions {
            compare_type_arguments: config.compare_type_arguments,
            match_setters: config.match_setters,
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
        // The default `Display` embeds a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl VireoConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn override_options(&self) -> OverrideOptions {
        self.overrides.into()
    }
}

/// Looks for a config file directly inside `dir`.
pub fn discover_config_path(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// JSON schema of [`VireoConfig`].
pub fn json_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(VireoConfig);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// Only the first call has an effect; later calls (and calls after another subscriber was
/// installed elsewhere) are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let text_layer = (config.stderr && !config.json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
        });
        let json_layer = (config.stderr && config.json).then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        });

        let subscriber = tracing_subscriber::registry()
            .with(config.env_filter())
            .with(text_layer)
            .with(json_layer);

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!(
                target: "vireo.config",
                "global tracing subscriber already installed"
            );
        }
    });
}
