pub mod config;

pub use config::{Config, ConfigError, DEFAULT_CONFIG_PATH, load_config, load_config_or_default};
