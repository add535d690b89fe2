//! Backend contract of the tutoring service. `wire` holds the JSON bodies,
//! `backend` the `TutorBackend` trait the controller is written against, and
//! `http` the reqwest implementation used by the binaries.

pub mod backend;
pub mod http;
pub mod wire;

pub use backend::{RequestError, TutorBackend};
pub use http::HttpBackend;
pub use wire::{CodeRequest, HelpResponse, ReflectRequest, ReflectResponse, RunResponse};
