use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for repository, query-builder and store operations.
///
/// Each kind describes one category of failure so callers can match on it
/// instead of parsing messages.
///
/// # Examples
///
/// ```rust,ignore
/// use repopulate::errors::{PopulateError, ErrorKind, PopulateResult};
///
/// fn example() -> PopulateResult<()> {
///     Err(PopulateError::new("User", ErrorKind::NotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Lookup Errors
    /// A singular lookup, update or delete matched no entity, or a required id was blank
    NotFound,
    /// No repository in a router is bound to the requested entity type
    RouteNotFound,
    /// The requested model is not registered in the store
    ModelNotFound,

    // Configuration Errors
    /// A repository was used without a bound model accessor
    RepositoryNotConfigured,

    // ID Errors
    /// The provided id is invalid
    InvalidId,
    /// A unique constraint (duplicate `_id`) was violated
    UniqueConstraintViolation,

    // Operation Errors
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Error during filter evaluation or construction
    FilterError,

    // Validation Errors
    /// Generic validation error
    ValidationError,
    /// Invalid data type for operation
    InvalidDataType,
    /// Invalid field name or unknown relation path
    InvalidFieldName,

    // Data Encoding Errors
    /// Error encoding or decoding data
    EncodingError,
    /// Error mapping an entity to or from a document
    ObjectMappingError,

    // Backend Errors
    /// Error from a storage backend
    BackendError,

    // Extension Errors - lets applications plug in their own error categories
    // (e.g. a domain "EntityNotFound" error produced by a not-found factory)
    /// Error from an application-defined category
    Extension(String),

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::RouteNotFound => write!(f, "Route not found"),
            ErrorKind::ModelNotFound => write!(f, "Model not found"),
            ErrorKind::RepositoryNotConfigured => write!(f, "Repository not configured"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::UniqueConstraintViolation => write!(f, "Unique constraint violation"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::Extension(name) => write!(f, "{} error", name),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// The error type of this crate.
///
/// `PopulateError` carries a message, a kind and an optional cause. A
/// backtrace is captured at construction for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use repopulate::errors::{PopulateError, ErrorKind};
///
/// let err = PopulateError::new("Comment", ErrorKind::NotFound);
///
/// let cause = PopulateError::new("lock poisoned", ErrorKind::BackendError);
/// let err = PopulateError::new_with_cause("Failed to read model", ErrorKind::BackendError, cause);
/// ```
#[derive(Clone)]
pub struct PopulateError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<PopulateError>>,
    backtrace: Atomic<Backtrace>,
}

impl PopulateError {
    /// Creates a new `PopulateError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        PopulateError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `PopulateError` that wraps a cause.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: PopulateError) -> Self {
        PopulateError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&PopulateError> {
        self.cause.as_deref()
    }
}

impl Display for PopulateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for PopulateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{} ({})\nCaused by: {:?}", self.message, self.error_kind, cause),
            None => write!(f, "{} ({})\n{:?}", self.message, self.error_kind, self.backtrace.read()),
        }
    }
}

impl Error for PopulateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for this crate.
///
/// `PopulateResult<T>` is shorthand for `Result<T, PopulateError>`.
pub type PopulateResult<T> = Result<T, PopulateError>;

impl From<std::io::Error> for PopulateError {
    fn from(err: std::io::Error) -> Self {
        PopulateError::new(&format!("IO error: {}", err), ErrorKind::BackendError)
    }
}

impl From<std::fmt::Error> for PopulateError {
    fn from(err: std::fmt::Error) -> Self {
        PopulateError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<std::num::ParseIntError> for PopulateError {
    fn from(err: std::num::ParseIntError) -> Self {
        PopulateError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<std::num::ParseFloatError> for PopulateError {
    fn from(err: std::num::ParseFloatError) -> Self {
        PopulateError::new(
            &format!("Float parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<serde_json::Error> for PopulateError {
    fn from(err: serde_json::Error) -> Self {
        PopulateError::new(
            &format!("Object mapping error: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

impl From<regex::Error> for PopulateError {
    fn from(err: regex::Error) -> Self {
        PopulateError::new(&format!("Invalid pattern: {}", err), ErrorKind::FilterError)
    }
}

impl From<String> for PopulateError {
    fn from(msg: String) -> Self {
        PopulateError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for PopulateError {
    fn from(msg: &str) -> Self {
        PopulateError::new(msg, ErrorKind::InternalError)
    }
}
