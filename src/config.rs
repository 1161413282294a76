use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Directory name under the user's home holding config and state.
pub const APP_DIR: &str = ".hhmm-calc";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub tape: TapeConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TapeConfig {
    /// Record and persist the history tape
    #[serde(default = "default_tape_enabled")]
    pub enabled: bool,
    /// Storage slot name; the tape lives in `<state_dir>/<storage_key>.json`
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_tape_enabled() -> bool {
    true
}

fn default_storage_key() -> String {
    "timecalc_tape".to_string()
}

impl Default for TapeConfig {
    fn default() -> Self {
        Self {
            enabled: default_tape_enabled(),
            storage_key: default_storage_key(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StateConfig {
    /// Optional override for state directory (for testing)
    pub state_dir_override: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl TapeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            anyhow::bail!("tape.storage_key must not be empty");
        }
        if self
            .storage_key
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '.')
        {
            anyhow::bail!(
                "Invalid tape.storage_key '{}': must be a plain file stem",
                self.storage_key
            );
        }
        Ok(())
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.filter)
            .with_context(|| format!("Invalid logging.filter '{}'", self.filter))?;
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.tape.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Build a config from an optional TOML file plus `HMC__SECTION__KEY` environment
/// overrides. A missing file yields defaults.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(
            Environment::with_prefix("HMC")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;

    config.validate()?;
    Ok(config)
}

pub fn config_path() -> Result<PathBuf> {
    let home = home::home_dir().context("Could not find home directory")?;
    Ok(home.join(APP_DIR).join("config.toml"))
}

pub fn load() -> Result<Config> {
    load_from_path(config_path()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.tape.enabled);
        assert_eq!(config.tape.storage_key, "timecalc_tape");
        assert_eq!(config.logging.filter, "warn");
        assert!(config.state.state_dir_override.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_key_rejects_paths() {
        let tape = TapeConfig {
            enabled: true,
            storage_key: "../escape".to_string(),
        };
        assert!(tape.validate().is_err());

        let tape = TapeConfig {
            enabled: true,
            storage_key: " ".to_string(),
        };
        assert!(tape.validate().is_err());
    }

    #[test]
    fn test_logging_filter_validation() {
        let logging = LoggingConfig {
            filter: "hhmm_calc=debug".to_string(),
        };
        assert!(logging.validate().is_ok());

        let logging = LoggingConfig {
            filter: "hhmm_calc=notalevel".to_string(),
        };
        assert!(logging.validate().is_err());
    }
}
