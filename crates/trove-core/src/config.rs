use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::error::CoreError;

/// Default read size for streamed searches.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Default Jaro-Winkler prefix boost per shared leading character.
pub const DEFAULT_PREFIX_SCALE: f64 = 0.1;

/// Default number of leading characters that can earn the prefix boost.
pub const DEFAULT_MAX_PREFIX_LENGTH: usize = 4;

/// Largest prefix scale that keeps Jaro-Winkler scores within `0.0..=1.0`
/// for the default prefix length.
pub const MAX_PREFIX_SCALE: f64 = 0.25;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub search: SearchConfig,
    pub similarity: SimilarityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub buffer_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityConfig {
    pub prefix_scale: f64,
    pub max_prefix_length: usize,
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with every default value.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be registered.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("search.buffer_size", DEFAULT_BUFFER_SIZE as u64)?
            .set_default("similarity.prefix_scale", DEFAULT_PREFIX_SCALE)?
            .set_default("similarity.max_prefix_length", DEFAULT_MAX_PREFIX_LENGTH as u64)?)
    }

    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `trove.toml` in the working directory.
    ///
    /// Environment variables use the `TROVE_` prefix with `__` between nested
    /// keys, e.g. `TROVE_SEARCH__BUFFER_SIZE=8192`.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the
    /// configuration fails.
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(
                config::Environment::with_prefix("TROVE")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("trove.toml").required(false));

        Self::from_builder(builder)
    }

    /// ## Summary
    /// Builds, deserializes and validates settings from a prepared builder.
    ///
    /// ## Errors
    /// Returns an error if any source fails to load or a value is invalid.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build()?.try_deserialize::<Self>()?;
        settings
            .validate()
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected configuration"))?;
        Ok(settings)
    }

    /// ## Summary
    /// Rejects values the library would refuse at call time.
    ///
    /// ## Errors
    /// Returns [`CoreError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.search.buffer_size == 0 {
            return Err(CoreError::Config(
                "search.buffer_size must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=MAX_PREFIX_SCALE).contains(&self.similarity.prefix_scale) {
            return Err(CoreError::Config(format!(
                "similarity.prefix_scale must be within 0.0..={MAX_PREFIX_SCALE}, got {}",
                self.similarity.prefix_scale
            )));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => tracing::trace!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file, continuing without it"),
    }

    Settings::load()
}
