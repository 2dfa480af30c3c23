//! # RivetDB Boundary
//!
//! The layer between the managed host runtime and the native RivetDB
//! engine. Generated dispatch stubs call into it to prepare and check
//! arguments before engine calls and to translate failures on the way out.
//!
//! This crate provides:
//! - Tagged handles and liveness/type validation ([`handle`])
//! - Total exception translation and pending-exception delivery
//!   ([`exceptions`])
//! - UTF-16 to proper UTF-8 string marshaling ([`string`])
//! - Bit-exact scalar and timestamp conversions ([`codec`])
//!
//! The engine itself is reached only through the introspection interface
//! in [`engine`]; this crate never mutates engine state and never frees
//! engine objects.

#![warn(missing_docs)]

pub mod codec;
pub mod engine;
pub mod error;
pub mod exceptions;
pub mod handle;
pub mod string;

pub use engine::{
    ColumnDescriptor, ColumnKey, ColumnType, EngineError, NativeStr, ObjKey, ObjectIntrospect,
    TableIntrospect, Timestamp, MAX_STRING_SIZE, NOT_FOUND,
};
pub use error::{BoundaryError, BoundaryResult, ErrorKind};
pub use exceptions::{
    classify, convert, convert_panic, host_class, on_load, protect, raise, raise_error, raise_for,
    take_pending, HostException,
};
pub use handle::{
    validate_column_type, validate_descriptor, validate_nullable, validate_object, validate_table,
    HandleKind, TaggedHandle,
};
pub use string::{to_host_string, to_host_utf16, StringAccessor};
