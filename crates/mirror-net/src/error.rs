//! Error types for mirror-net

/// Result type for mirror-net operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-net operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (DNS, refused, timeout, TLS)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A response arrived but its status marks a failure
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {message}")]
    Client { message: String },
}

impl Error {
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Error text as recorded in reports and sync outcomes.
    ///
    /// Transport failures keep the underlying client message verbatim.
    pub fn detail(&self) -> String {
        match self {
            Self::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
