use thiserror::Error;

/// A detection backend call failed.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request to {operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} is not supported by this client")]
    Unsupported { operation: &'static str },

    #[error("detection backend error: {0}")]
    Backend(String),
}

impl ServiceError {
    /// Network failures, throttling and server-side errors may succeed on a
    /// later attempt. Everything else is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Transport { .. } => true,
            ServiceError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
