//! Script generation errors and retry classification.

/// Failure conditions of one generation call.
///
/// A completion whose text is not a parseable JSON array is deliberately absent:
/// the client absorbs it into a single fallback script instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No API key configured under the given name
    #[display("Missing credential: {} is not configured", _0)]
    MissingCredential(String),
    /// Network failure, timeout or non-2xx provider status
    #[display("Transport error (status: {:?}): {}", status, message)]
    Transport {
        /// HTTP status code, absent for network failures and timeouts
        status: Option<u16>,
        /// Error message or response body
        message: String,
    },
    /// HTTP succeeded but the payload lacks `choices[0].message.content`
    #[display("Invalid response shape: {}", _0)]
    InvalidResponseShape(String),
    /// Every attempt failed; carries the last transport error
    #[display("Failed after {} attempts: {}", attempts, last)]
    RetriesExhausted {
        /// Number of HTTP attempts made
        attempts: u32,
        /// The error of the final attempt
        last: Box<GenerationErrorKind>,
    },
    /// Request violates a data-model invariant
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Only transport failures are transient. Credential, shape and request
    /// errors fail the call immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationErrorKind::Transport { .. })
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use shortscript_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingCredential(
///     "DEEPSEEK_API_KEY".to_string(),
/// ));
/// assert!(format!("{}", err).contains("DEEPSEEK_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a transport failure.
    #[track_caller]
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Transport {
            status,
            message: message.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use shortscript_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::transport(Some(503), "Service unavailable");
/// assert!(err.is_retryable());
///
/// let err = GenerationError::new(GenerationErrorKind::InvalidResponseShape(
///     "missing choices".to_string(),
/// ));
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger another attempt.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
