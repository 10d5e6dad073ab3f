use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::steps::{load_steps_file, StepCatalog};

/// Environment variable prefix for overrides (e.g. `INHERITANCE_PORTAL__UI__MOUSE=false`)
pub const ENV_PREFIX: &str = "INHERITANCE_PORTAL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Input poll interval in milliseconds (default: 250)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Whether clicking a step selects it (default: true)
    #[serde(default = "default_mouse")]
    pub mouse: bool,
}

fn default_tick_rate() -> u64 {
    250
}

fn default_mouse() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            mouse: default_mouse(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_logs_dir")]
    pub logs: String,
}

fn default_logs_dir() -> String {
    ".inheritance-portal/logs".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            logs: default_logs_dir(),
        }
    }
}

/// Which step catalog to run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Step file (toml, yaml or json); the built-in inheritance workflow when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_file: Option<String>,
}

impl Config {
    /// Load configuration from embedded defaults, the user config file, an
    /// explicit config file and the environment, in that order.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/inheritance-portal/
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Path of the per-user config file, if a config directory exists
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inheritance-portal").join("config.toml"))
    }

    /// Serialize as TOML, e.g. to seed a user config file
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.logs);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Build the step catalog this configuration selects
    pub fn step_catalog(&self) -> Result<StepCatalog> {
        match &self.workflow.steps_file {
            Some(path) => {
                let catalog = load_steps_file(Path::new(path))
                    .with_context(|| format!("Failed to load step catalog from {path}"))?;
                tracing::info!(path = %path, steps = catalog.len(), "Loaded step catalog");
                Ok(catalog)
            }
            None => Ok(StepCatalog::inheritance()),
        }
    }
}
