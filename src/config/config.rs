use serde::{Deserialize, Serialize};
use std::{env, fs, io, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::theme::ThemeMode;

pub const CONFIG_FILE: &str = ".tutor_pad_config.json";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    /// Keys written by other tools are carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        if let Ok(home) = env::var("HOME") {
            PathBuf::from(home).join(CONFIG_FILE)
        } else {
            PathBuf::from(CONFIG_FILE)
        }
    }

    /// Read the config at `path`. A missing file yields the defaults.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::read`], but a broken file is logged and treated as empty.
    pub fn load(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Base URL precedence: the command line (flag or `TUTOR_PAD_BASE_URL`),
    /// then this file, then the local default.
    pub fn resolve_base_url(&self, cli_value: Option<&str>) -> String {
        [cli_value, self.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(normalize_base_url)
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

/// Server root without a trailing slash. A missing scheme means plain http,
/// and a pasted `/api` or endpoint suffix is stripped since paths are added
/// per request.
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut normalized = trimmed.trim_end_matches('/').to_string();

    if !normalized.starts_with("http://") && !normalized.starts_with("https://") {
        normalized = format!("http://{}", normalized);
    }

    for suffix in ["/api/run", "/api/help", "/api/reflect", "/api"] {
        if let Some(stripped) = normalized.strip_suffix(suffix) {
            normalized = stripped.trim_end_matches('/').to_string();
            break;
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::read(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"theme":"light","font_size":14}"#).unwrap();

        let mut config = Config::read(&path).unwrap();
        assert_eq!(config.theme, Some(ThemeMode::Light));
        config.theme = Some(ThemeMode::Dark);
        config.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["font_size"], 14);
    }

    #[test]
    fn malformed_file_errors_on_read_but_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::read(&path), Err(ConfigError::Json { .. })));
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn base_url_precedence() {
        let config = Config {
            base_url: Some("http://file:1".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_base_url(Some("http://flag:1")),
            "http://flag:1"
        );
        assert_eq!(config.resolve_base_url(Some("  ")), "http://file:1");
        assert_eq!(config.resolve_base_url(None), "http://file:1");
        assert_eq!(Config::default().resolve_base_url(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn normalize_adds_scheme_and_strips_api_suffix() {
        assert_eq!(normalize_base_url("localhost:8000/"), "http://localhost:8000");
        assert_eq!(
            normalize_base_url("https://tutor.example.com/api/run"),
            "https://tutor.example.com"
        );
        assert_eq!(normalize_base_url("http://host:1/api/"), "http://host:1");
        assert_eq!(normalize_base_url("   "), "");
    }
}
