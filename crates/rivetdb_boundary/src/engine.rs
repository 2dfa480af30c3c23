//! Engine-facing types and introspection interface.
//!
//! The storage/query engine is an external collaborator. This module pins
//! down the narrow slice of it that the boundary layer calls into: column
//! and object keys, the column type tags used for validation, the timestamp
//! representation, the nullable native string view, and the introspection
//! traits the validators consult. Nothing here mutates engine state.

use std::fmt;
use thiserror::Error;

/// Sentinel returned by engine lookups that found nothing.
///
/// Distinct from every valid index, including `0`.
pub const NOT_FOUND: usize = usize::MAX;

/// Maximum byte length of a string the engine will store.
///
/// Strings are length-prefixed inside engine arrays; the prefix field caps
/// payloads just below 16 MiB.
pub const MAX_STRING_SIZE: usize = 0x00FF_FFF0;

/// Stable key identifying a column within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnKey(pub u64);

impl ColumnKey {
    /// Creates a column key from its raw value.
    #[must_use]
    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col:{}", self.0)
    }
}

/// Stable key identifying an object (row) within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjKey(pub u64);

impl ObjKey {
    /// Creates an object key from its raw value.
    #[must_use]
    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj:{}", self.0)
    }
}

/// Declared type of a column, as reported by the engine schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 64-bit integer column.
    Int,
    /// Boolean column.
    Bool,
    /// UTF-8 string column.
    String,
    /// Binary blob column.
    Binary,
    /// 32-bit float column.
    Float,
    /// 64-bit float column.
    Double,
    /// Timestamp column.
    Timestamp,
    /// Link to a single object in another table.
    Link,
    /// List of links to objects in another table.
    LinkList,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "Int",
            Self::Bool => "Bool",
            Self::String => "String",
            Self::Binary => "Binary",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Timestamp => "Timestamp",
            Self::Link => "Link",
            Self::LinkList => "LinkList",
        };
        f.write_str(name)
    }
}

/// A column key paired with its declared type.
///
/// Used only to validate dispatch-stub arguments; never mutated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// The column being validated.
    pub key: ColumnKey,
    /// The type the caller expects the column to have.
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    /// Creates a descriptor for a column and its expected type.
    #[must_use]
    pub const fn new(key: ColumnKey, column_type: ColumnType) -> Self {
        Self { key, column_type }
    }
}

/// Engine timestamp: seconds since epoch plus a nanosecond component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanoseconds: i32,
}

impl Timestamp {
    /// Creates a timestamp from seconds and nanoseconds.
    #[must_use]
    pub const fn new(seconds: i64, nanoseconds: i32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Returns the seconds component.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    /// Returns the nanoseconds component.
    #[must_use]
    pub const fn nanoseconds(self) -> i32 {
        self.nanoseconds
    }
}

/// Borrowed view of a string in the engine's representation.
///
/// The engine distinguishes a null string from an empty one, so this is not
/// a plain `&str`. Views borrow from a [`StringAccessor`] and must not
/// outlive it; the lifetime enforces that.
///
/// [`StringAccessor`]: crate::string::StringAccessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeStr<'a> {
    data: Option<&'a str>,
}

impl<'a> NativeStr<'a> {
    /// The null string.
    #[must_use]
    pub const fn null() -> Self {
        Self { data: None }
    }

    /// A view over UTF-8 text.
    #[must_use]
    pub const fn new(data: &'a str) -> Self {
        Self { data: Some(data) }
    }

    /// Returns true for the null string.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.data.is_none()
    }

    /// Returns the text, or `None` for the null string.
    #[must_use]
    pub const fn as_str(self) -> Option<&'a str> {
        self.data
    }

    /// Returns the byte length; the null string has length zero.
    #[must_use]
    pub fn len(self) -> usize {
        self.data.map_or(0, str::len)
    }

    /// Returns true if the view is null or empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Introspection the boundary layer performs on a table.
///
/// Implemented by the engine's table reference; the mock in
/// `rivetdb_testkit` implements it for tests.
pub trait TableIntrospect {
    /// Whether the table is still attached to a live transaction.
    fn is_attached(&self) -> bool;

    /// Declared type of a column.
    fn column_type(&self, key: ColumnKey) -> ColumnType;

    /// Schema name of a column, for diagnostics.
    fn column_name(&self, key: ColumnKey) -> String;

    /// Whether a column accepts nulls.
    fn is_column_nullable(&self, key: ColumnKey) -> bool;

    /// Whether a column holds a list of primitives.
    fn is_column_list(&self, key: ColumnKey) -> bool;
}

/// Introspection the boundary layer performs on an object (row).
pub trait ObjectIntrospect {
    /// Whether the object is still attached to a live row.
    ///
    /// Returns false once the row is deleted, possibly by another thread.
    fn is_valid(&self) -> bool;
}

/// Failures the engine can report to this layer.
///
/// The set is open-ended on the engine side; [`convert`] maps anything not
/// listed here to `RuntimeError` so no failure is ever lost.
///
/// [`convert`]: crate::exceptions::convert
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The transaction's read version is no longer available.
    #[error("bad version: read transaction is no longer current")]
    BadVersion,

    /// A database file could not be accessed.
    #[error("file access failed: {message}")]
    FileAccess {
        /// Description of the file-level failure.
        message: String,
    },

    /// A database file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path the engine attempted to open.
        path: String,
    },

    /// The engine failed to allocate memory.
    #[error("out of memory")]
    OutOfMemory,

    /// A caller-supplied value was rejected by the engine.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// An index was outside the valid range.
    #[error("index {index} out of bounds (size {size})")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The container size at the time of access.
        size: usize,
    },

    /// The requested operation is not supported by the engine.
    #[error("unsupported operation: {message}")]
    Unsupported {
        /// Description of the unsupported operation.
        message: String,
    },

    /// Any other engine failure.
    #[error("{message}")]
    Internal {
        /// Message reported by the engine, preserved verbatim.
        message: String,
    },
}

impl EngineError {
    /// Creates a file access error.
    pub fn file_access(message: impl Into<String>) -> Self {
        Self::FileAccess {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Creates an internal engine error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
