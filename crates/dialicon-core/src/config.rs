use std::{fs, path::PathBuf};

use dialicon_proto::config::{ClockIconConfig, ConfigValidationError, DEFAULT_CONFIG_FILE_PATH};
use log::debug;
use masterror::AppError;

/// Describes failures while loading the clock icon configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Reading the configuration file from disk failed.
    Read { path: PathBuf, context: String },
    /// Parsing TOML content failed.
    Parse { path: PathBuf, context: String },
    /// Validation detected a logical inconsistency.
    Validation(ConfigValidationError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, context } => {
                write!(f, "failed to read config at {:?}: {}", path, context)
            }
            Self::Parse { path, context } => {
                write!(f, "failed to parse config at {:?}: {}", path, context)
            }
            Self::Validation(err) => {
                write!(f, "invalid config: {}", err)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigValidationError> for ConfigError {
    fn from(err: ConfigValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Load and validate a [`ClockIconConfig`] from a TOML file.
///
/// Falls back to [`DEFAULT_CONFIG_FILE_PATH`] when `path` is `None`. The
/// path may start with `~`, which expands to the user's home directory.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read, is not valid TOML or
/// fails validation.
pub fn load(path: Option<&str>) -> Result<ClockIconConfig, ConfigError> {
    let path = resolve_path(path);
    debug!("loading clock icon config from {:?}", path);

    let raw = fs::read_to_string(&path).map_err(|err| ConfigError::Read {
        path: path.clone(),
        context: err.to_string(),
    })?;

    let config: ClockIconConfig = toml::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        context: err.to_string(),
    })?;

    config.validate()?;

    Ok(config)
}

fn resolve_path(path: Option<&str>) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.unwrap_or(DEFAULT_CONFIG_FILE_PATH)).into_owned())
}
