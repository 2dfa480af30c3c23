//! Error taxonomy surfaced to the host runtime.

use std::fmt;

/// Result type for boundary operations.
pub type BoundaryResult<T> = Result<T, BoundaryError>;

/// Closed set of failure categories the host can observe.
///
/// Every native failure is mapped to exactly one kind before it crosses the
/// boundary; unrecognized failures fall back to [`RuntimeError`] or
/// [`FatalError`], never silently swallowed. Each kind corresponds to one
/// host exception class (see [`crate::exceptions`]).
///
/// [`RuntimeError`]: ErrorKind::RuntimeError
/// [`FatalError`]: ErrorKind::FatalError
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required host class could not be resolved.
    ClassNotFound,
    /// A caller-supplied argument was rejected.
    IllegalArgument,
    /// An index was outside the valid range.
    IndexOutOfBounds,
    /// The operation is not supported.
    UnsupportedOperation,
    /// Native allocation failed.
    OutOfMemory,
    /// Unrecoverable native failure; the engine instance should not be
    /// reused after this.
    FatalError,
    /// Recognized failure with no more specific category.
    RuntimeError,
    /// The transaction's read version is no longer available.
    BadVersion,
    /// A handle's underlying object is no longer valid to operate on.
    IllegalState,
    /// Database file-level failure.
    FileError,
}

impl ErrorKind {
    /// All kinds, in wire order.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::ClassNotFound,
        ErrorKind::IllegalArgument,
        ErrorKind::IndexOutOfBounds,
        ErrorKind::UnsupportedOperation,
        ErrorKind::OutOfMemory,
        ErrorKind::FatalError,
        ErrorKind::RuntimeError,
        ErrorKind::BadVersion,
        ErrorKind::IllegalState,
        ErrorKind::FileError,
    ];
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ClassNotFound => "ClassNotFound",
            Self::IllegalArgument => "IllegalArgument",
            Self::IndexOutOfBounds => "IndexOutOfBounds",
            Self::UnsupportedOperation => "UnsupportedOperation",
            Self::OutOfMemory => "OutOfMemory",
            Self::FatalError => "FatalError",
            Self::RuntimeError => "RuntimeError",
            Self::BadVersion => "BadVersion",
            Self::IllegalState => "IllegalState",
            Self::FileError => "FileError",
        };
        f.write_str(name)
    }
}

/// A failure detected by the boundary layer itself.
///
/// Carries the kind it will surface as, a message, and optionally the name
/// of the offending item (column, table) appended to the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryError {
    kind: ErrorKind,
    message: String,
    item: Option<String>,
}

impl BoundaryError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            item: None,
        }
    }

    /// Creates an error naming the offending item.
    pub fn with_item(
        kind: ErrorKind,
        message: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            item: Some(item.into()),
        }
    }

    /// Creates an `IllegalState` error.
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalState, message)
    }

    /// Creates an `IllegalArgument` error.
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalArgument, message)
    }

    /// Creates an `IllegalArgument` error naming the offending item.
    pub fn illegal_argument_for(message: impl Into<String>, item: impl Into<String>) -> Self {
        Self::with_item(ErrorKind::IllegalArgument, message, item)
    }

    /// The kind this error surfaces as.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message without the item suffix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending item, if one was recorded.
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{}: {}", self.message, item),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for BoundaryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_is_closed_set() {
        assert_eq!(ErrorKind::ALL.len(), 10);
        let names: Vec<String> = ErrorKind::ALL.iter().map(ToString::to_string).collect();
        // No duplicates
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn error_renders_item_suffix() {
        let err = BoundaryError::illegal_argument_for("field is not nullable", "age");
        assert_eq!(err.to_string(), "field is not nullable: age");
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
        assert_eq!(err.item(), Some("age"));
    }

    #[test]
    fn error_without_item() {
        let err = BoundaryError::illegal_state("Table is no longer valid to operate on.");
        assert_eq!(err.to_string(), "Table is no longer valid to operate on.");
        assert_eq!(err.item(), None);
    }
}
