//! The classified error union.
//!
//! Every failure — local pre-flight, transport, server, or domain — is
//! converted into [`Error`] at the pipeline boundary; no raw transport or
//! codec error escapes to callers.

use thiserror::Error;

use crate::encoding::EncodeError;

pub type Result<T> = std::result::Result<T, Error>;

/// Native transport failure categories, for errors raised before any
/// response exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request timed out.
    Timeout,
    /// Connection establishment failed (DNS, TCP, TLS).
    Connect,
    /// The request could not be constructed or sent.
    Request,
    /// The response body could not be read.
    Body,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
        };
        f.write_str(name)
    }
}

/// The single discriminated error type surfaced to callers.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Input encoding failed before any network activity.
    #[error("encoding failed at field `{path}`: {message}")]
    Encode { path: String, message: String },

    /// The transport completed without a response and without a recognizable
    /// native error.
    #[error("the server returned no response")]
    NoResponse,

    /// The response carried no body where one was required.
    #[error("the response carried no body")]
    MissingBody,

    /// The response body could not be decoded into the expected output.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A service-specific error envelope parsed from the response body,
    /// wrapping the failure that triggered the parse.
    #[error("service error: {message}")]
    Service {
        message: String,
        details: Option<serde_json::Value>,
        #[source]
        source: Box<Error>,
    },

    /// A non-2xx status that no other classification claimed.
    #[error("unacceptable status code {status}")]
    Status { status: u16, body: Option<String> },

    /// A recognizable native transport failure.
    #[error("transport failure ({kind}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    /// The endpoint requires credentials but the service holds none.
    #[error("the endpoint requires authorization but no credential is set")]
    MissingCredential,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Client or transport construction problems.
    #[error("configuration error: {0}")]
    Config(String),

    /// A service hook rejected the request or response.
    #[error("hook error: {0}")]
    Hook(String),

    /// An error raised by caller code that has no better classification.
    #[error("{0}")]
    Custom(String),

    /// Wrapper attaching the endpoint's operation name for display.
    #[error("{name}: {source}")]
    Operation {
        name: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps `self` with an operation name, if one is known and `self` is not
    /// already wrapped.
    pub fn with_operation(self, name: Option<&str>) -> Self {
        match name {
            Some(name) if !matches!(self, Error::Operation { .. }) => Error::Operation {
                name: name.to_owned(),
                source: Box::new(self),
            },
            _ => self,
        }
    }

    /// Peels the operation wrapper, if any.
    pub fn root(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// The operation name attached by the pipeline, if any.
    pub fn operation(&self) -> Option<&str> {
        match self {
            Error::Operation { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The HTTP status this error carries, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self.root() {
            Error::Status { status, .. } => Some(*status),
            Error::Service { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Whether the failure is on our side rather than the caller's.
    ///
    /// Callers are expected to display the reason and, only when this is
    /// `true`, append a request to report the issue.
    pub fn is_internal(&self) -> bool {
        match self.root() {
            Error::Encode { .. }
            | Error::NoResponse
            | Error::MissingBody
            | Error::Decode(_)
            | Error::Transport { .. }
            | Error::InvalidUrl(_)
            | Error::Config(_)
            | Error::Hook(_) => true,
            Error::Service { .. }
            | Error::Status { .. }
            | Error::MissingCredential
            | Error::Custom(_) => false,
            Error::Operation { .. } => unreachable!("root() never returns a wrapper"),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(err: EncodeError) -> Self {
        Error::Encode {
            path: err.path,
            message: err.message,
        }
    }
}
