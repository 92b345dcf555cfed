//! Shared configuration loader for the mor tools.
//!
//! `defaults/mor.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MorConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mor_parser::mor::masking::MaskingRules;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mor.default.toml");

/// The file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "mor.toml";

/// Top-level configuration consumed by mor applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MorConfig {
    pub masking: MaskingConfig,
    pub serialization: SerializationConfig,
}

/// Mirrors [`MaskingRules`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MaskingConfig {
    pub threshold: i64,
    pub fingerprint_feature: String,
    pub score_feature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerializationConfig {
    pub include_comments: bool,
}

impl From<&MaskingConfig> for MaskingRules {
    fn from(config: &MaskingConfig) -> Self {
        MaskingRules {
            threshold: config.threshold,
            fingerprint_feature: config.fingerprint_feature.clone(),
            score_feature: config.score_feature.clone(),
        }
    }
}

impl MorConfig {
    pub fn masking_rules(&self) -> MaskingRules {
        MaskingRules::from(&self.masking)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MorConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MorConfig, ConfigError> {
    Loader::new().build()
}
