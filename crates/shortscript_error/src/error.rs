//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, GenerationErrorKind, JsonError, StorageError};

/// Every error the workspace can surface to a caller.
///
/// # Examples
///
/// ```
/// use shortscript_error::{ShortscriptError, ConfigError};
///
/// let config_err = ConfigError::new("Missing [provider] section");
/// let err: ShortscriptError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ShortscriptErrorKind {
    /// Generation error (credential, transport, response shape, retries)
    #[from(GenerationError)]
    Generation(GenerationError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Shortscript error with kind discrimination.
///
/// # Examples
///
/// ```
/// use shortscript_error::{ShortscriptResult, ConfigError};
///
/// fn might_fail() -> ShortscriptResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Shortscript Error: {}", _0)]
pub struct ShortscriptError(Box<ShortscriptErrorKind>);

impl ShortscriptError {
    /// Create a new error from a kind.
    pub fn new(kind: ShortscriptErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ShortscriptErrorKind {
        &self.0
    }

    /// Get the generation error kind, if this is a generation failure.
    pub fn generation_kind(&self) -> Option<&GenerationErrorKind> {
        match self.kind() {
            ShortscriptErrorKind::Generation(e) => Some(&e.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to ShortscriptErrorKind
impl<T> From<T> for ShortscriptError
where
    T: Into<ShortscriptErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for shortscript operations.
pub type ShortscriptResult<T> = std::result::Result<T, ShortscriptError>;
