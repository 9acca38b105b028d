//! Error types for the console client.

use thiserror::Error;

/// A shared error type for every layer of the console client.
///
/// Transport failures, rejected envelopes, session renewal failures and
/// encryption failures all surface to facade callers through this one type.
/// Individual malformed response lines are never reported here; parsers drop
/// them and return a partial structure instead.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Network unreachable, timed out, or a non-2xx HTTP status.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
    },

    /// The server answered with an envelope whose `code` is not 0,
    /// or with an envelope that could not be decoded.
    #[error("Server rejected request (code {code}): {message}")]
    Protocol { code: i64, message: String },

    /// Session creation failed on both the secure and insecure endpoint.
    #[error("Session error: {0}")]
    Session(String),

    /// No public key was available, or the RSA primitive failed.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request was refused locally before it reached the wire.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A response that must match a fixed shape did not.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A multi-command operation stopped part way through.
    ///
    /// The first `completed` sub-commands were applied on the server and are
    /// not rolled back.
    #[error("Operation partially applied ({completed}/{total} steps): {source}")]
    PartiallyApplied {
        completed: usize,
        total: usize,
        #[source]
        source: Box<ConsoleError>,
    },
}

impl ConsoleError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error without an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status_code: None,
        }
    }

    /// Creates a Protocol error
    pub fn protocol(code: i64, message: impl Into<String>) -> Self {
        Self::Protocol {
            code,
            message: message.into(),
        }
    }

    /// Creates a Session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Creates an Encryption error
    pub fn encryption(message: impl Into<String>) -> Self {
        Self::Encryption(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates an UnexpectedResponse error
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse(message.into())
    }

    /// Wraps a failure of step `completed + 1` out of `total`.
    pub fn partially_applied(completed: usize, total: usize, source: ConsoleError) -> Self {
        Self::PartiallyApplied {
            completed,
            total,
            source: Box::new(source),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a Protocol error
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    /// Check if this is a Session error
    pub fn is_session(&self) -> bool {
        matches!(self, Self::Session(_))
    }

    /// Check if this is an Encryption error
    pub fn is_encryption(&self) -> bool {
        matches!(self, Self::Encryption(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true when the server may hold a partial result of this call.
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartiallyApplied { completed, .. } if *completed > 0)
    }
}

/// A type alias for `Result<T, ConsoleError>`.
pub type Result<T> = std::result::Result<T, ConsoleError>;
