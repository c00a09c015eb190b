//! Rendering configuration.
//!
//! `defaults/haml.default.toml` is embedded into the library so the documented
//! defaults and the runtime defaults cannot drift apart. Callers layer their own
//! files and overrides on top via [`Loader`] before deserializing into
//! [`HamlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, Source, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/haml.default.toml");

/// Top-level configuration consumed by the compiler.
#[derive(Debug, Clone, Deserialize)]
pub struct HamlConfig {
    pub render: RenderOptions,
}

/// Controls how rendered lines are assembled into the output string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderOptions {
    /// Placed between rendered lines. `""` concatenates them.
    pub line_join_string: String,
    /// Repeated once per depth level in front of each rendered line.
    pub indent_unit_string: String,
}

impl RenderOptions {
    pub fn new(line_join_string: impl Into<String>, indent_unit_string: impl Into<String>) -> Self {
        Self {
            line_join_string: line_join_string.into(),
            indent_unit_string: indent_unit_string.into(),
        }
    }

    /// Human-readable output: one line per tag, two-space indentation.
    pub fn pretty() -> Self {
        Self::new("\n", "  ")
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// Configuration sources stacked lowest precedence first: the embedded
/// defaults, then files and inline TOML in the order they were added, then
/// key overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
        .layer(File::from_str(DEFAULT_TOML, FileFormat::Toml))
    }

    fn layer<S>(mut self, source: S) -> Self
    where
        S: Source + Send + Sync + 'static,
    {
        self.builder = self.builder.add_source(source);
        self
    }

    fn toml_file(self, path: &Path, required: bool) -> Self {
        self.layer(File::from(path).format(FileFormat::Toml).required(required))
    }

    /// Layer a TOML file that must exist; `build` fails otherwise.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), false)
    }

    pub fn with_toml(self, toml: &str) -> Self {
        self.layer(File::from_str(toml, FileFormat::Toml))
    }

    /// Override one dotted key, e.g. `render.indent_unit_string`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<HamlConfig, ConfigError> {
        let config: HamlConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(render = ?config.render, "loaded configuration");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<HamlConfig, ConfigError> {
    Loader::new().build()
}
