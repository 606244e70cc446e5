//! Error types for the chat runtime.
//!
//! This module defines error types for line parsing failures, transport
//! failures, authentication failures, and runtime lifecycle errors.

use thiserror::Error;

/// Convenience type alias for Results using [`CoreError`].
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

/// Top-level runtime errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Transport-level failure during connect, disconnect, or send.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication failure; no session can be established.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// A received line failed to parse.
    #[error("invalid line: {string}")]
    InvalidLine {
        /// The raw line that failed to parse.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: LineParseError,
    },

    /// Cooperative shutdown was requested.
    #[error("cancelled")]
    Cancelled,
}

/// Errors encountered when parsing an IRC line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LineParseError {
    /// Line was empty.
    #[error("empty line")]
    EmptyLine,

    /// The `@tags` segment had no terminating space.
    #[error("unterminated tags segment")]
    UnterminatedTags,

    /// The `:prefix` segment had no terminating space.
    #[error("unterminated prefix segment")]
    UnterminatedPrefix,

    /// No command was present after tags and prefix.
    #[error("missing command")]
    MissingCommand,
}

/// Errors surfaced by the transport provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection attempt failed.
    #[error("connect failed: {0}")]
    Connect(String),

    /// The connection is closed.
    #[error("connection closed")]
    Closed,

    /// A send failed after the connection was established.
    #[error("send failed: {0}")]
    Send(String),

    /// I/O error from the underlying socket.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the auth provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    /// No tokens are stored; the user has never logged in.
    #[error("no credentials available")]
    MissingTokens,

    /// Token refresh was attempted and failed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransportError::Send("socket reset".to_string());
        assert_eq!(format!("{}", err), "send failed: socket reset");

        let err = AuthError::RefreshFailed("401".to_string());
        assert_eq!(format!("{}", err), "token refresh failed: 401");
    }

    #[test]
    fn test_invalid_line_source_chaining() {
        let cause = LineParseError::MissingCommand;
        let err = CoreError::InvalidLine {
            string: "@tags-only".to_string(),
            cause: cause.clone(),
        };

        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), cause.to_string());
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let transport_err: TransportError = io_err.into();
        let core_err: CoreError = transport_err.into();

        match core_err {
            CoreError::Transport(TransportError::Io(_)) => {}
            _ => panic!("Expected Transport(Io) variant"),
        }
    }
}
