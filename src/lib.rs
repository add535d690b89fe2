//! Client library for the recursion tutoring exercise: the editor controller,
//! its view model, the theme store, and the HTTP backend it talks to.
//! The `tutor` and `tutor-cmd` binaries are thin shells over these modules.

pub mod api;
pub mod config;
pub mod controller;
pub mod editor;
pub mod lesson;
pub mod logging;
pub mod theme;
