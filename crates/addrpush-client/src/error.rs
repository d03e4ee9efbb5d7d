use addrpush_core::AddrError;
use thiserror::Error;

/// Result type alias for device API operations
pub type Result<T> = std::result::Result<T, PanosError>;

/// Errors that can occur when talking to the device API
#[derive(Error, Debug)]
pub enum PanosError {
    /// Credentials were rejected during key generation
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// An authenticated call was made without an API key
    #[error("no API key: authenticate before calling the configuration API")]
    MissingKey,

    /// The device answered with `status="error"`
    #[error("API error{}: {message}", .code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Api {
        /// Error code from the response, or the HTTP status
        code: Option<u16>,
        /// Error message from the response
        message: String,
    },

    /// A configuration change was refused; `request` is safe to display
    #[error("{what} was rejected by the device: {message}")]
    PushRejected {
        /// What was being pushed
        what: String,
        /// The offending request with the API key redacted
        request: String,
        /// Error message from the device
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Response body is not well-formed XML
    #[error("malformed XML response: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Response is XML but not shaped as expected
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Client configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation or batching error from the core crate
    #[error(transparent)]
    Addr(#[from] AddrError),
}

impl PanosError {
    /// Returns true if the credentials were rejected
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::MissingKey)
    }

    /// Returns true if the device could not be reached at all
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }

    /// The displayable request behind a rejected push, if any
    #[must_use]
    pub fn rejected_request(&self) -> Option<&str> {
        match self {
            Self::PushRejected { request, .. } => Some(request),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PanosError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            Self::Connection(e.to_string())
        } else if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}
