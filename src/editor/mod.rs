//! Text model behind the code editor pane. The terminal front end renders it
//! and forwards keys to it; the controller reads the draft from it.

pub mod buffer;

pub use buffer::{DEFAULT_SNIPPET, EditorBuffer, TAB_WIDTH};
