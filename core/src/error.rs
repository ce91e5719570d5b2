//! Error type returned by `CatalogClient` parse methods.
//!
//! # Design
//! Every failure leaving the client has the same shape: a kind and one
//! human-readable message. Transport failures carry the server's own
//! `message` when it sent one. Validation failures collapse their violation
//! list into the comma-joined reasons, so callers never see the structured
//! list.

use thiserror::Error;

use crate::validate::ValidationError;

/// Broad category of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request did not complete: network failure or non-2xx status.
    Transport,
    /// A 2xx response whose body was not JSON.
    Decode,
    /// The body decoded but failed shape or constraint checks.
    Validation,
}

/// Normalized failure of one catalog request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    status: Option<u16>,
    message: String,
}

impl ApiError {
    /// A request that never produced a response, e.g. connection refused.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            status: None,
            message: message.into(),
        }
    }

    /// A response with a non-2xx status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Decode,
            status: None,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status, when the failure came from a response.
    pub fn http_status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self {
            kind: ErrorKind::Validation,
            status: None,
            message: err.message(),
        }
    }
}
