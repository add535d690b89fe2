//! Light/dark preference: the mode type, where it is persisted, and the
//! store that applies it and notifies the toggle glyph.

pub mod storage;
pub mod store;

pub use storage::{FileThemeStorage, MemoryThemeStorage, ThemeStorage};
pub use store::{MOON_GLYPH, SUN_GLYPH, ThemeMode, ThemeStore};
