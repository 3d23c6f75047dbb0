//! Configuration loader
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. Default values from `AppConfig::default()`
//! 2. TOML configuration file (explicit path, or the first default location found)
//! 3. Environment variables, e.g. `STARTLOG__STARTUP__DEFAULT_CATEGORY`
//!
//! Loading normally runs before logging is initialized, so the loader does
//! not log. [`ConfigLoader::load_with_source`] reports the file that was
//! actually merged instead, for the caller to log once logging is up.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::parse_log_level;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use startlog_domain::error::{Error, Result};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the file layer of a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// This file was found and merged
    File(PathBuf),
    /// An explicit path was given but does not exist; defaults were used
    NotFound(PathBuf),
    /// No path was given and no default location had a file
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) | Self::NotFound(path) => Some(path),
            Self::Defaults => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "Configuration file: {}", path.display()),
            Self::NotFound(path) => write!(
                f,
                "Configuration file not found: {}, using defaults and environment",
                path.display()
            ),
            Self::Defaults => f.write_str("Configuration from defaults and environment"),
        }
    }
}

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        self.load_with_source().map(|(config, _)| config)
    }

    /// Load and validate configuration, reporting which file was merged
    pub fn load_with_source(&self) -> Result<(AppConfig, ConfigSource)> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        let source = match &self.config_path {
            Some(path) if path.exists() => ConfigSource::File(path.clone()),
            Some(path) => ConfigSource::NotFound(path.clone()),
            None => Self::find_default_config_path().map_or(ConfigSource::Defaults, ConfigSource::File),
        };
        if let ConfigSource::File(path) = &source {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok((app_config, source))
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(config)
            .config_context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;
        Ok(())
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(
                config_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            );
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    if config.startup.default_category.trim().is_empty() {
        return Err(Error::configuration(
            "startup.default_category cannot be empty",
        ));
    }
    parse_log_level(&config.logging.level)?;
    Ok(())
}
