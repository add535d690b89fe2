//! Persistent client settings: backend base URL and theme preference, kept
//! in a small JSON file in the user's home directory.

pub mod config;

pub use config::{
    CONFIG_FILE, Config, ConfigError, DEFAULT_BASE_URL, normalize_base_url,
};
