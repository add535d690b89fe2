use async_trait::async_trait;
use thiserror::Error;

use crate::api::wire::{
    CodeRequest, HelpResponse, ReflectRequest, ReflectResponse, RunResponse,
};

/// Any failure while sending a request or decoding its reply. Transport
/// errors, non-JSON bodies and missing fields all collapse into this one
/// kind; only the message reaches the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The three round trips the editor controller performs.
#[async_trait]
pub trait TutorBackend: Send + Sync + 'static {
    async fn run(&self, request: CodeRequest) -> Result<RunResponse, RequestError>;

    async fn help(&self, request: CodeRequest) -> Result<HelpResponse, RequestError>;

    async fn reflect(&self, request: ReflectRequest) -> Result<ReflectResponse, RequestError>;
}
