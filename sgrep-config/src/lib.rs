//! Configuration loader: an optional `sgrep.toml`, layered over built-in
//! defaults, with `SGREP_*` environment variable overrides on top.
//!
//! `defaults/sgrep.default.toml` is embedded into the binary so the
//! built-in behavior and its documentation never drift apart, matching
//! this codebase's shared config-loader convention.

use std::path::Path;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use config::builder::DefaultState;
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../defaults/sgrep.default.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SgrepConfig {
    pub extensions: Vec<String>,
    pub ignore_globs: Vec<String>,
    pub color: ColorMode,
}

/// Layers a user's `sgrep.toml` and `SGREP_*` environment overrides over
/// the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref()).format(FileFormat::Toml).required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref()).format(FileFormat::Toml).required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn with_env(mut self) -> Self {
        self.builder = self
            .builder
            .add_source(Environment::with_prefix("SGREP").separator("__"));
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SgrepConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Search `start` and its ancestors for `sgrep.toml`, layer it (if found)
/// and `SGREP_*` environment overrides over the built-in defaults.
pub fn load_from(start: &Path) -> Result<SgrepConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(found) = find_config_file(start) {
        loader = loader.with_optional_file(found);
    }
    loader.with_env().build()
}

fn find_config_file(start: &Path) -> Option<std::path::PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join("sgrep.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}

/// Convenience helper for callers that only need the built-in defaults
/// with environment overrides, no project file lookup.
pub fn load_defaults() -> Result<SgrepConfig, ConfigError> {
    Loader::new().with_env().build()
}
