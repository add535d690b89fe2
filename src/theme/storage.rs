use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::{Config, ConfigError};
use crate::theme::ThemeMode;

/// Where the theme preference survives between sessions.
pub trait ThemeStorage: Send {
    /// Best-effort read; anything unreadable counts as unset.
    fn load(&self) -> Option<ThemeMode>;

    fn save(&mut self, mode: ThemeMode) -> Result<(), ConfigError>;
}

/// Persists the `theme` key of the client config file.
#[derive(Debug, Clone)]
pub struct FileThemeStorage {
    path: PathBuf,
}

impl FileThemeStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStorage for FileThemeStorage {
    fn load(&self) -> Option<ThemeMode> {
        Config::load(&self.path).theme
    }

    /// Leaves a file that does not parse untouched and reports why.
    fn save(&mut self, mode: ThemeMode) -> Result<(), ConfigError> {
        let mut config = Config::read(&self.path)?;
        config.theme = Some(mode);
        config.save(&self.path)
    }
}

/// In-process storage. Clones share the same slot, so a test can keep one
/// handle and give the other to a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStorage {
    slot: Arc<Mutex<Option<ThemeMode>>>,
}

impl MemoryThemeStorage {
    pub fn with(mode: ThemeMode) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(mode))),
        }
    }

    pub fn stored(&self) -> Option<ThemeMode> {
        self.slot.lock().map(|slot| *slot).unwrap_or(None)
    }
}

impl ThemeStorage for MemoryThemeStorage {
    fn load(&self) -> Option<ThemeMode> {
        self.stored()
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), ConfigError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(mode);
        }
        Ok(())
    }
}
