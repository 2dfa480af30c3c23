//! Integration scenarios exercising the full dispatch-stub call path.
//!
//! Generated dispatch stubs are out of scope for the boundary crates, but
//! their shape is fixed: rebuild tagged handles from raw integers, validate,
//! marshal, run the engine call under `protect`, drain the pending
//! exception. The stubs here follow that shape exactly so tests cover the
//! same path the real bindings use.

use rivetdb_boundary::codec::to_host_bool;
use rivetdb_boundary::engine::{ColumnKey, ColumnType, EngineError, ObjectIntrospect};
use rivetdb_boundary::exceptions::protect;
use rivetdb_boundary::handle::{
    validate_column_type, validate_nullable, validate_object, validate_table, HandleKind,
    TaggedHandle,
};
use rivetdb_boundary::string::StringAccessor;

use crate::mock::{MockObject, MockTable};

/// Stub for a `set_string(table, object, column, value)` call.
///
/// Returns the transcoded byte length the engine write would receive, or
/// `None` with a pending exception.
pub fn stub_set_string(
    table: TaggedHandle,
    object: TaggedHandle,
    column: ColumnKey,
    value: Option<&[u16]>,
) -> Option<usize> {
    protect(|| {
        // Safety: the test owns the mock objects for the whole call.
        let table: &MockTable = unsafe { table.deref_as(HandleKind::Table) }?;
        validate_table(table)?;

        let object: Option<&MockObject> = if object.is_null() {
            None
        } else {
            Some(unsafe { object.deref_as(HandleKind::Object) }?)
        };
        validate_object(object)?;

        validate_column_type(table, column, ColumnType::String)?;

        let accessor = StringAccessor::new(value)?;
        if accessor.is_null() {
            validate_nullable(table, column)?;
        }
        let view = accessor.as_native_view()?;

        // The engine write would happen here.
        Ok(view.len())
    })
}

/// Stub for an `object_is_valid(object)` call.
///
/// Infallible by design: liveness queries report rather than raise.
#[must_use]
pub fn stub_object_is_valid(object: &MockObject) -> u8 {
    to_host_bool(object.is_valid())
}

/// Stub wrapping a bare engine call, the minimal funnel every fallible
/// boundary crossing goes through.
pub fn stub_engine_call<T>(f: impl FnOnce() -> Result<T, EngineError>) -> Option<T> {
    protect(|| Ok(f()?))
}
