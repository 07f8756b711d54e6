//! Configuration file loading for the CLI
//!
//! A configuration comes from the first of these that applies:
//!
//! 1. the path given with `--config`, which must exist;
//! 2. `fgd/config.toml` under the working directory;
//! 3. `config.toml` in the platform configuration directory.
//!
//! Without any of them the defaults are used. Every failure names the file
//! it came from.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use fgd::{FgdError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to parse TOML configuration: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("configuration file does not exist")]
    MissingFile(PathBuf),
}

impl ConfigError {
    /// The configuration file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::MissingFile(path) => path,
        }
    }
}

impl From<ConfigError> for FgdError {
    fn from(err: ConfigError) -> Self {
        FgdError::Config {
            path: err.path().to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
}

impl ConfigSource {
    fn path(&self) -> &Path {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Local(path) | ConfigSource::System(path) => {
                path
            }
        }
    }

    /// Explicit paths are used even when missing, so the error is reported.
    fn is_usable(&self) -> bool {
        matches!(self, ConfigSource::Explicit(_)) || self.path().exists()
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(_) => f.write_str("explicit"),
            ConfigSource::Local(_) => f.write_str("local"),
            ConfigSource::System(_) => f.write_str("system"),
        }
    }
}

/// The places to look for a configuration file, most specific first.
fn candidates(explicit_path: Option<&Path>) -> Vec<ConfigSource> {
    if let Some(path) = explicit_path {
        return vec![ConfigSource::Explicit(path.to_path_buf())];
    }

    let mut sources = vec![ConfigSource::Local(PathBuf::from("fgd/config.toml"))];
    match ProjectDirs::from("com", "fgd", "fgd") {
        Some(proj_dirs) => {
            sources.push(ConfigSource::System(proj_dirs.config_dir().join("config.toml")));
        }
        None => debug!("Could not determine platform-specific config directory"),
    }
    sources
}

/// Find and load the configuration.
///
/// # Errors
///
/// Returns [`FgdError::Config`] if an explicit path does not exist or the
/// chosen file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, FgdError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(|path| path.as_ref());
    for source in candidates(explicit_path) {
        if !source.is_usable() {
            debug!(source:%, path:? = source.path(); "Configuration file not found");
            continue;
        }
        info!(source:%, path:? = source.path(); "Loading configuration");
        return load_config_file(source.path()).map_err(FgdError::from);
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
