use std::fmt;
use thiserror::Error;

/// The error type returned by signing and credential operations.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential's validity window has passed and no refresh path
    /// produced a newer one.
    CredentialExpired,

    /// A credential source failed to yield a usable credential.
    CredentialLoad,

    /// The request is missing fields required for signing (authority, path,
    /// method) or carries values that cannot be signed.
    MalformedRequest,

    /// The request payload digest cannot be derived, so the content cannot
    /// be covered by the signature.
    UnsupportedContentEncoding,

    /// Unexpected errors (I/O, encoding, internal failures).
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause of this error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Create a credential expired error.
    pub fn credential_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialExpired, message)
    }

    /// Create a credential load error.
    pub fn credential_load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialLoad, message)
    }

    /// Create a malformed request error.
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedRequest, message)
    }

    /// Create an unsupported content encoding error.
    pub fn unsupported_content_encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedContentEncoding, message)
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialExpired => write!(f, "expired credential"),
            ErrorKind::CredentialLoad => write!(f, "credential load failed"),
            ErrorKind::MalformedRequest => write!(f, "malformed request"),
            ErrorKind::UnsupportedContentEncoding => write!(f, "unsupported content encoding"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::malformed_request(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::malformed_request(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::malformed_request(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::malformed_request(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::malformed_request(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_preserved() {
        let err = Error::credential_expired("key expired at 2023-01-01T00:00:00Z");
        assert_eq!(err.kind(), ErrorKind::CredentialExpired);
        assert_eq!(err.to_string(), "key expired at 2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::credential_load("reading credential file").with_source(io);
        assert_eq!(err.kind(), ErrorKind::CredentialLoad);
        assert!(std::error::Error::source(&err).is_some());
    }
}
