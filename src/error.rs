//! Error taxonomy shared by the API client, the resolver and the command
//! handlers.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No session, or trakt rejected the session token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// An id or search did not resolve to anything.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network failure or an undecodable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// trakt answered with a non-success status that has no dedicated variant.
    #[error("trakt responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Bad user input, raised before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// The user quit a prompt.
    #[error("aborted")]
    Cancelled,

    #[error("failed to read input: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Maps an HTTP status to the matching variant.
    pub fn from_status(status: StatusCode, path: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(format!(
                "trakt rejected the session ({}), re-authenticate and try again",
                status
            )),
            StatusCode::NOT_FOUND => Error::NotFound(format!("/{}", path)),
            _ => Error::Status { status, body },
        }
    }
}
