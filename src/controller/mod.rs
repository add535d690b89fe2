//! The editor controller and the view model it maintains.
//!
//! Every user action lands here as a method call. Network round trips run as
//! spawned tokio tasks whose completions come back over a channel; the UI
//! thread drains that channel with [`EditorController::process_events`] and
//! re-renders from [`ViewModel`]. Nothing in this module knows about the
//! terminal.

pub mod controller;
pub mod view;

pub use controller::{ActionHandle, ActionKind, ControllerEvent, EditorController};
pub use view::{
    EMPTY_EXPLANATION_ALERT, EVALUATING_PLACEHOLDER, PASS_MARKER, RUNNING_PLACEHOLDER,
    THINKING_PLACEHOLDER, ViewModel,
};
