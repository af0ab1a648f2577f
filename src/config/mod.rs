mod settings;

pub use settings::{Config, ConfigError, DEFAULT_STORAGE_KEY, EXAMPLE_CONFIG};
