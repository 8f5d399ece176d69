//! Configuration loading from disk and environment.
//!
//! Variable precedence: process environment, then the `.env` file, then the
//! TOML file, then built-in defaults.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the processor base URL.
pub const PROCESSOR_URL_ENV: &str = "PROCESSOR_URL";

/// Default location of the dotenv file, relative to the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Variables declared in a dotenv file.
pub type DotenvVars = HashMap<String, String>;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Dotenv error: {0}")]
    Dotenv(#[from] dotenv::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a dotenv file without touching the process environment.
///
/// A missing file yields no variables.
pub fn read_dotenv(path: &Path) -> Result<DotenvVars, ConfigError> {
    let iter = match dotenv::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(DotenvVars::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(iter.collect::<Result<DotenvVars, _>>()?)
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied before validation.
pub fn load_config(path: &Path, dotenv: &DotenvVars) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: RelayConfig = toml::from_str(&content)?;
    apply_env(&mut config, dotenv);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus environment overrides.
pub fn from_env(dotenv: &DotenvVars) -> Result<RelayConfig, ConfigError> {
    let mut config = RelayConfig::default();
    apply_env(&mut config, dotenv);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply process environment overrides, falling back to dotenv values.
pub fn apply_env(config: &mut RelayConfig, dotenv: &DotenvVars) {
    apply_env_from(config, env_lookup(dotenv));
}

/// Lookup that prefers the process environment over `dotenv`.
///
/// A variable present in the process, even empty, hides the dotenv value.
pub fn env_lookup(dotenv: &DotenvVars) -> impl Fn(&str) -> Option<String> + '_ {
    move |key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
}

/// Apply overrides from an arbitrary variable lookup.
///
/// An empty `PROCESSOR_URL` counts as unset.
pub fn apply_env_from<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(PROCESSOR_URL_ENV).filter(|v| !v.is_empty()) {
        config.processor.url = Some(url);
    }
}
