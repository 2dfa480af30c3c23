//! Tagged handles and liveness/type validation.
//!
//! Host code holds engine objects as native-sized integers. Rather than
//! reinterpreting those integers directly, each one travels with an
//! explicit [`HandleKind`] tag, and [`TaggedHandle::deref_as`] checks the
//! tag before producing a typed reference.
//!
//! The engine owns every object a handle points at and may invalidate it
//! from another thread at any time (a row deleted, a table removed). The
//! validators therefore treat every handle as possibly stale: they consult
//! the engine object at the moment of use and never cache a result across
//! calls. They never mutate engine state; their only side effects are an
//! error-severity log line and the returned error.

use crate::engine::{ColumnDescriptor, ColumnKey, ColumnType, ObjectIntrospect, TableIntrospect};
use crate::error::{BoundaryError, BoundaryResult};

/// What kind of engine object a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// A table reference.
    Table,
    /// An object (row) reference.
    Object,
    /// A column reference.
    Column,
}

impl std::fmt::Display for HandleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Object => "object",
            Self::Column => "column",
        };
        f.write_str(name)
    }
}

/// An opaque reference to an engine object, as passed across the boundary.
///
/// Pairs the native address with the kind it was created as. The layer
/// never frees what the address points at; destruction belongs to the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedHandle {
    addr: usize,
    kind: HandleKind,
}

impl TaggedHandle {
    /// Creates a handle for an engine object the engine just returned.
    #[must_use]
    pub fn for_ref<T>(target: &T, kind: HandleKind) -> Self {
        Self {
            addr: target as *const T as usize,
            kind,
        }
    }

    /// Reconstructs a handle from the integer form the host passed in.
    #[must_use]
    pub fn from_raw(raw: i64, kind: HandleKind) -> Self {
        Self {
            addr: raw as usize,
            kind,
        }
    }

    /// The integer form that crosses the boundary.
    #[must_use]
    pub fn as_raw(self) -> i64 {
        self.addr as i64
    }

    /// The native address.
    #[must_use]
    pub fn addr(self) -> usize {
        self.addr
    }

    /// The kind this handle was created as.
    #[must_use]
    pub fn kind(self) -> HandleKind {
        self.kind
    }

    /// True for the null handle.
    #[must_use]
    pub fn is_null(self) -> bool {
        self.addr == 0
    }

    /// Produces a typed reference to the underlying engine object.
    ///
    /// Fails with `IllegalArgument` if the tag does not match `expected`
    /// and with `IllegalState` for the null handle.
    ///
    /// # Safety
    ///
    /// The address must point at a live `T` for the duration of `'a`. Tag
    /// checking rules out mixed-up handles, not dangling ones; callers must
    /// still run the liveness validators before trusting the object.
    pub unsafe fn deref_as<'a, T>(self, expected: HandleKind) -> BoundaryResult<&'a T> {
        if self.kind != expected {
            tracing::error!(addr = self.addr, kind = %self.kind, %expected, "handle tag mismatch");
            return Err(BoundaryError::illegal_argument(format!(
                "handle tag mismatch: expected {expected}, got {}",
                self.kind
            )));
        }
        if self.addr == 0 {
            tracing::error!(%expected, "null handle");
            return Err(BoundaryError::illegal_state(format!(
                "null {expected} handle"
            )));
        }
        Ok(&*(self.addr as *const T))
    }
}

/// Checks that a table reference is still attached.
///
/// Callers must not touch the table when this returns an error.
pub fn validate_table<T: TableIntrospect>(table: &T) -> BoundaryResult<()> {
    if !table.is_attached() {
        tracing::error!("table is no longer attached");
        return Err(BoundaryError::illegal_state(
            "Table is no longer valid to operate on.",
        ));
    }
    Ok(())
}

/// Checks that an object reference is non-null and still attached to a
/// live row.
pub fn validate_object<O: ObjectIntrospect>(object: Option<&O>) -> BoundaryResult<()> {
    let valid = object.is_some_and(ObjectIntrospect::is_valid);
    if !valid {
        let addr = object.map_or(0, |o| o as *const O as usize);
        tracing::error!(addr, "object is no longer attached");
        return Err(BoundaryError::illegal_state(
            "Object is no longer valid to operate on. Was it deleted by another thread?",
        ));
    }
    Ok(())
}

/// Checks that a column's declared type matches what the caller expects.
#[cfg(feature = "param-checks")]
pub fn validate_column_type<T: TableIntrospect>(
    table: &T,
    column: ColumnKey,
    expected: ColumnType,
) -> BoundaryResult<()> {
    let actual = table.column_type(column);
    if actual != expected {
        tracing::error!(%column, %expected, %actual, "column type mismatch");
        return Err(BoundaryError::illegal_argument(format!(
            "ColumnType of '{}' is invalid.",
            table.column_name(column)
        )));
    }
    Ok(())
}

/// Type checking is compiled out; always succeeds.
#[cfg(not(feature = "param-checks"))]
pub fn validate_column_type<T: TableIntrospect>(
    _table: &T,
    _column: ColumnKey,
    _expected: ColumnType,
) -> BoundaryResult<()> {
    Ok(())
}

/// Checks a column descriptor against the table schema.
pub fn validate_descriptor<T: TableIntrospect>(
    table: &T,
    descriptor: &ColumnDescriptor,
) -> BoundaryResult<()> {
    validate_column_type(table, descriptor.key, descriptor.column_type)
}

/// Checks that a column accepts null values.
///
/// Link columns are always nullable. Link-list columns and primitive list
/// columns never are, regardless of element type. Everything else defers
/// to the column's own nullable flag.
#[cfg(feature = "param-checks")]
pub fn validate_nullable<T: TableIntrospect>(table: &T, column: ColumnKey) -> BoundaryResult<()> {
    let column_type = table.column_type(column);
    if column_type == ColumnType::Link {
        return Ok(());
    }

    if column_type == ColumnType::LinkList || table.is_column_list(column) {
        return Err(BoundaryError::illegal_argument(format!(
            "List column '{}' is not nullable.",
            table.column_name(column)
        )));
    }

    if table.is_column_nullable(column) {
        return Ok(());
    }

    tracing::error!(%column, "expected nullable column");
    Err(BoundaryError::illegal_argument(format!(
        "Field '{}' is not nullable.",
        table.column_name(column)
    )))
}

/// Nullability checking is compiled out; always succeeds.
#[cfg(not(feature = "param-checks"))]
pub fn validate_nullable<T: TableIntrospect>(_table: &T, _column: ColumnKey) -> BoundaryResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct StubObject {
        valid: bool,
    }

    impl ObjectIntrospect for StubObject {
        fn is_valid(&self) -> bool {
            self.valid
        }
    }

    #[test]
    fn raw_round_trip_preserves_address() {
        let value = 7_u64;
        let handle = TaggedHandle::for_ref(&value, HandleKind::Object);
        let back = TaggedHandle::from_raw(handle.as_raw(), HandleKind::Object);
        assert_eq!(handle, back);
        assert!(!handle.is_null());
    }

    #[test]
    fn deref_checks_the_tag() {
        let value = 7_u64;
        let handle = TaggedHandle::for_ref(&value, HandleKind::Object);

        let ok = unsafe { handle.deref_as::<u64>(HandleKind::Object) };
        assert_eq!(ok.unwrap(), &7);

        let err = unsafe { handle.deref_as::<u64>(HandleKind::Table) }.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
    }

    #[test]
    fn deref_rejects_null() {
        let handle = TaggedHandle::from_raw(0, HandleKind::Table);
        let err = unsafe { handle.deref_as::<u64>(HandleKind::Table) }.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn null_object_is_invalid() {
        let err = validate_object::<StubObject>(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert!(err.message().contains("deleted by another thread"));
    }

    #[test]
    fn detached_object_is_invalid() {
        let object = StubObject { valid: false };
        let err = validate_object(Some(&object)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn attached_object_is_valid() {
        let object = StubObject { valid: true };
        assert!(validate_object(Some(&object)).is_ok());
    }
}
