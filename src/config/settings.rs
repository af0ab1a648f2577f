use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::model::Survey;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Storage key the saved survey list lives under
pub const DEFAULT_STORAGE_KEY: &str = "savedSurveyList";

/// Editor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// How long an alert stays visible (default: 5 seconds)
    pub alert_timeout: Duration,
    /// Maximum undo depth; 0 keeps everything
    pub history_limit: usize,
    /// Key of the saved survey list in the key-value store
    pub storage_key: String,
    /// Survey JSON installed on load and clear (None = empty survey)
    pub initial_survey: Option<PathBuf>,
    /// Option-label presets offered on load
    pub option_groups: Vec<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alert_timeout: Duration::from_secs(5),
            history_limit: 0,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            initial_survey: None,
            option_groups: default_option_groups(),
        }
    }
}

fn default_option_groups() -> Vec<Vec<String>> {
    [
        &["Yes", "No"][..],
        &["True", "False"][..],
        &[
            "Strongly Disagree",
            "Disagree",
            "Neither agree or disagree",
            "Agree",
            "Strongly Agree",
        ][..],
    ]
    .iter()
    .map(|labels| labels.iter().map(|l| l.to_string()).collect())
    .collect()
}

/// Errors reading configuration or the files it points at
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid initial survey {path}: {reason}")]
    InitialSurvey { path: PathBuf, reason: String },
}

/// TOML representation of the `[editor]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlEditorConfig {
    pub alert_timeout_ms: Option<u64>,
    pub history_limit: Option<usize>,
    pub initial_survey: Option<PathBuf>,
}

/// TOML representation of the `[storage]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlStorageConfig {
    pub key: Option<String>,
}

/// TOML representation of one `[[option_groups]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct TomlOptionGroup {
    pub labels: Vec<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub editor: Option<TomlEditorConfig>,
    pub storage: Option<TomlStorageConfig>,
    /// Replaces the built-in presets when present
    pub option_groups: Option<Vec<TomlOptionGroup>>,
}

impl Config {
    /// Load configuration from the default config file, merging with defaults.
    ///
    /// Writes the bundled example on first run. An unreadable or invalid file
    /// is logged and the defaults are used.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %config_file.display(), error = %e, "Using default config");
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Merge a TOML document over the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(editor) = toml_config.editor {
            if let Some(ms) = editor.alert_timeout_ms {
                config.alert_timeout = Duration::from_millis(ms);
            }
            if let Some(limit) = editor.history_limit {
                config.history_limit = limit;
            }
            if editor.initial_survey.is_some() {
                config.initial_survey = editor.initial_survey;
            }
        }

        if let Some(key) = toml_config.storage.and_then(|s| s.key) {
            config.storage_key = key;
        }

        if let Some(groups) = toml_config.option_groups {
            config.option_groups = groups.into_iter().map(|g| g.labels).collect();
        }

        Ok(config)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_alert_timeout(mut self, timeout: Duration) -> Self {
        self.alert_timeout = timeout;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Read the configured initial survey, or an empty one
    pub fn initial_survey(&self) -> Result<Survey, ConfigError> {
        let Some(path) = &self.initial_survey else {
            return Ok(Survey::new());
        };
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let invalid = |reason: String| ConfigError::InitialSurvey {
            path: path.clone(),
            reason,
        };
        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;
        Survey::from_json(value).map_err(|e| invalid(e.to_string()))
    }
}
