use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for jsondb operations
///
/// Each kind names one category of failure so callers can react to it
/// without parsing messages.
///
/// # Examples
///
/// ```rust
/// use jsondb::errors::{ErrorKind, JsonDbError, JsonDbResult};
///
/// fn example() -> JsonDbResult<()> {
///     Err(JsonDbError::new("Index not found", ErrorKind::IndexNotFound))
/// }
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::IndexNotFound);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Filter Errors
    /// Unknown operator symbol in a filter clause
    InvalidOperator,
    /// Malformed operand for a known operator
    FilterError,

    // Aggregation and general operation errors
    /// Unknown aggregate operation, or an operation that is not valid in the current state
    InvalidOperation,

    // Indexing Errors
    /// Index does not exist
    IndexNotFound,

    // ID and Identity Errors
    /// The `_id` of a document is not a string
    InvalidId,
    /// A document with the same `_id` already exists
    UniqueConstraintViolation,

    // Validation Errors
    /// Empty field name or empty path segment
    InvalidFieldName,

    // IO and Storage Errors
    /// Generic IO error
    IOError,
    /// The file or directory was not found
    FileNotFound,
    /// Permission denied for file operation
    PermissionDenied,
    /// Error encoding or decoding JSON
    EncodingError,

    // Collection/Database Errors
    /// Collection does not exist or has been dropped
    CollectionNotFound,
    /// The database has already been closed
    StoreAlreadyClosed,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidOperator => write!(f, "Invalid operator"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::IndexNotFound => write!(f, "Index not found"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::UniqueConstraintViolation => write!(f, "Unique constraint violation"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::StoreAlreadyClosed => write!(f, "Store already closed"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom jsondb error type.
///
/// `JsonDbError` carries a message, an [ErrorKind] and an optional cause. A
/// backtrace is captured unresolved at construction and only resolved when the
/// error is printed with `{:?}`.
///
/// # Examples
///
/// ```rust
/// use jsondb::errors::{ErrorKind, JsonDbError};
///
/// let cause = JsonDbError::new("disk gone", ErrorKind::IOError);
/// let err = JsonDbError::new_with_cause("Failed to save", ErrorKind::IOError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct JsonDbError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<JsonDbError>>,
    backtrace: Backtrace,
}

impl JsonDbError {
    /// Creates a new `JsonDbError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        JsonDbError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new_unresolved(),
        }
    }

    /// Creates a new `JsonDbError` that wraps the error which caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: JsonDbError) -> Self {
        JsonDbError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new_unresolved(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&JsonDbError> {
        self.cause.as_deref()
    }
}

impl Display for JsonDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for JsonDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                let mut backtrace = self.backtrace.clone();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self.message, backtrace)
            }
        }
    }
}

impl Error for JsonDbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for jsondb operations.
pub type JsonDbResult<T> = Result<T, JsonDbError>;

impl From<std::io::Error> for JsonDbError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        JsonDbError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for JsonDbError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return JsonDbError::new(&format!("IO error: {}", err), ErrorKind::IOError);
        }
        JsonDbError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}
