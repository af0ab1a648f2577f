//! Path utilities for the editor's data directory

use std::path::PathBuf;
use std::sync::OnceLock;

/// Global storage for custom data directory path
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the data directory with an optional custom path.
/// Call early in main() before any other path function.
/// If custom_path is None, uses the default ~/.survey-editor location.
pub fn init_data_dir(custom_path: Option<PathBuf>) {
    let path = custom_path.unwrap_or_else(default_data_dir);
    if DATA_DIR.set(path.clone()).is_err() {
        let existing = DATA_DIR
            .get()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        tracing::debug!(
            path = %path.display(),
            existing = %existing,
            "Data directory already initialized"
        );
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".survey-editor"))
        .unwrap_or_else(|| PathBuf::from(".survey-editor"))
}

/// Base data directory: the path set via init_data_dir(), otherwise ~/.survey-editor
pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// ~/.survey-editor/surveys.db
pub fn database_path() -> PathBuf {
    data_dir().join("surveys.db")
}

pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// ~/.survey-editor/logs/survey-editor.log
pub fn log_file_path() -> PathBuf {
    logs_dir().join("survey-editor.log")
}

/// ~/.survey-editor/config.toml
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}
