//! Error types shared by fetch implementations and the async driver.

use crate::core::{Classify, ErrorClass};
use thiserror::Error;

/// Ready-made fetch error for callers without their own error type.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unavailable: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("server rejected request: {0}")]
    Server(String),
}

impl From<tokio::time::error::Elapsed> for FetchError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Timeout
    }
}

impl Classify for FetchError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::Network(_) | Self::Timeout | Self::Io(_) => ErrorClass::Network,
            Self::Decode(_) | Self::Server(_) => ErrorClass::Other,
        }
    }
}

/// Errors raised by [`ListLoader`](crate::effects::ListLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("no operation in flight")]
    Idle,
}
