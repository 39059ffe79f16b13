//! Failures reported by the outer services (audio, score storage)
//!
//! None of these are fatal: the session logs them and carries on.

use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// Backend missing on this platform (no window, no storage, no device)
    Unavailable(&'static str),
    /// The host refused the request, e.g. autoplay blocked
    Rejected(String),
    /// Stored data could not be decoded
    Corrupt(String),
    Io(std::io::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Unavailable(what) => write!(f, "{what} unavailable"),
            ServiceError::Rejected(msg) => write!(f, "request rejected: {msg}"),
            ServiceError::Corrupt(msg) => write!(f, "corrupt data: {msg}"),
            ServiceError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(err)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Corrupt(err.to_string())
    }
}
