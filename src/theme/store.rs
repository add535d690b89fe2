use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::theme::storage::ThemeStorage;

/// Toggle glyph while the dark theme is active.
pub const SUN_GLYPH: &str = "☀️";
/// Toggle glyph while the light theme (or no theme) is active.
pub const MOON_GLYPH: &str = "🌙";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// The toggle shows where a click would take you.
    pub fn glyph(self) -> &'static str {
        match self {
            ThemeMode::Dark => SUN_GLYPH,
            ThemeMode::Light => MOON_GLYPH,
        }
    }
}

type Subscriber = Box<dyn FnMut(ThemeMode) + Send>;

/// Current theme plus its persistence. `None` means no preference has been
/// applied yet, which renders and toggles like light.
pub struct ThemeStore {
    current: Option<ThemeMode>,
    storage: Box<dyn ThemeStorage>,
    subscriber: Option<Subscriber>,
}

impl ThemeStore {
    /// Build a store and read the persisted preference once.
    pub fn load(storage: impl ThemeStorage + 'static) -> Self {
        let current = storage.load();
        debug!(theme = ?current, "theme preference loaded");
        Self {
            current,
            storage: Box::new(storage),
            subscriber: None,
        }
    }

    pub fn get(&self) -> Option<ThemeMode> {
        self.current
    }

    pub fn effective(&self) -> ThemeMode {
        self.current.unwrap_or(ThemeMode::Light)
    }

    pub fn glyph(&self) -> &'static str {
        self.effective().glyph()
    }

    /// Register the single listener; a later call replaces the earlier one.
    pub fn subscribe(&mut self, subscriber: impl FnMut(ThemeMode) + Send + 'static) {
        self.subscriber = Some(Box::new(subscriber));
    }

    /// Apply `mode`, persist it, and notify the subscriber. A failed write is
    /// logged; the new theme still applies for this session.
    pub fn set(&mut self, mode: ThemeMode) {
        self.current = Some(mode);
        if let Err(e) = self.storage.save(mode) {
            warn!(error = %e, theme = mode.as_str(), "failed to persist theme");
        }
        if let Some(subscriber) = self.subscriber.as_mut() {
            subscriber(mode);
        }
    }

    /// Switch to the opposite theme; unset goes to dark.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = match self.current {
            Some(ThemeMode::Dark) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        };
        self.set(next);
        next
    }
}
