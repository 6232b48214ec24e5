use std::fmt;

use thiserror::Error;
use verifier_core::{EmailVerificationRecord, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// An attempt failed and another one will follow after the retry delay.
    AttemptFailed {
        request_id: RequestId,
        attempt: u32,
        max_attempts: u32,
        error: AttemptError,
    },
    VerificationCompleted {
        request_id: RequestId,
        result: Result<Vec<EmailVerificationRecord>, VerifyError>,
    },
}

/// Outcome of a single request to the verification service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AttemptError {
    pub kind: AttemptFailure,
    pub message: String,
}

impl AttemptError {
    pub fn new(kind: AttemptFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport and HTTP-status failures are worth another attempt; a
    /// response that arrived but broke the contract is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            AttemptFailure::Network | AttemptFailure::Timeout | AttemptFailure::HttpStatus(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    Network,
    Timeout,
    HttpStatus(u16),
    /// Body was JSON but not a top-level array.
    NotAnArray,
    /// Body or one of its records could not be decoded.
    Decode,
    EmptyEmail { index: usize },
    DuplicateEmail { email: String },
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Network => write!(f, "network error"),
            AttemptFailure::Timeout => write!(f, "timeout"),
            AttemptFailure::HttpStatus(code) => write!(f, "http status {code}"),
            AttemptFailure::NotAnArray => write!(f, "response is not a record array"),
            AttemptFailure::Decode => write!(f, "undecodable response"),
            AttemptFailure::EmptyEmail { index } => write!(f, "record {index} has an empty email"),
            AttemptFailure::DuplicateEmail { email } => {
                write!(f, "email {email} appears more than once")
            }
            AttemptFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}

/// Terminal failure of a verification request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("verification service unavailable after {attempts} attempts: {last}")]
    Unavailable {
        attempts: u32,
        #[source]
        last: AttemptError,
    },
    #[error("invalid response from verification service: {0}")]
    InvalidResponse(#[source] AttemptError),
}

impl VerifyError {
    /// The underlying error of the final attempt.
    pub fn last_error(&self) -> &AttemptError {
        match self {
            VerifyError::Unavailable { last, .. } => last,
            VerifyError::InvalidResponse(err) => err,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to start engine: {0}")]
    Io(#[from] std::io::Error),
    #[error("engine thread has stopped")]
    Disconnected,
}
