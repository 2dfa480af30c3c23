//! Exception translation and delivery to the host runtime.
//!
//! Dispatch stubs must never let a native failure unwind across the
//! boundary: that is undefined behavior in the host runtime. Instead every
//! fallible stub body runs under [`protect`], which converts engine errors,
//! boundary errors and panics into a [`HostException`] parked in a
//! per-thread pending slot. The stub drains the slot with [`take_pending`]
//! and throws on the host side.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::OnceLock;

use crate::engine::EngineError;
use crate::error::{BoundaryError, BoundaryResult, ErrorKind};

/// An exception ready to be thrown in the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostException {
    class: &'static str,
    message: String,
}

impl HostException {
    /// Builds an exception of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            class: host_class(kind),
            message: message.into(),
        }
    }

    /// Host exception class to instantiate, as a binary class path.
    #[must_use]
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Message carried to the host.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for HostException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.class, self.message)
    }
}

/// Immutable mapping from [`ErrorKind`] to host exception classes.
///
/// Built once, either by [`on_load`] when the host runtime loads the native
/// library or lazily on first use, and never mutated afterwards.
#[derive(Debug)]
struct ExceptionTable {
    classes: [&'static str; 10],
}

impl ExceptionTable {
    fn build() -> Self {
        let mut classes = [""; 10];
        for kind in ErrorKind::ALL {
            classes[table_index(kind)] = match kind {
                ErrorKind::ClassNotFound => "java/lang/ClassNotFoundException",
                ErrorKind::IllegalArgument => "java/lang/IllegalArgumentException",
                ErrorKind::IndexOutOfBounds => "java/lang/IndexOutOfBoundsException",
                ErrorKind::UnsupportedOperation => "java/lang/UnsupportedOperationException",
                ErrorKind::OutOfMemory => "java/lang/OutOfMemoryError",
                ErrorKind::FatalError => "io/rivetdb/exceptions/RivetError",
                ErrorKind::RuntimeError => "java/lang/RuntimeException",
                ErrorKind::BadVersion => "io/rivetdb/internal/BadVersionException",
                ErrorKind::IllegalState => "java/lang/IllegalStateException",
                ErrorKind::FileError => "io/rivetdb/exceptions/RivetFileException",
            };
        }
        Self { classes }
    }

    fn class(&self, kind: ErrorKind) -> &'static str {
        self.classes[table_index(kind)]
    }
}

fn table_index(kind: ErrorKind) -> usize {
    match kind {
        ErrorKind::ClassNotFound => 0,
        ErrorKind::IllegalArgument => 1,
        ErrorKind::IndexOutOfBounds => 2,
        ErrorKind::UnsupportedOperation => 3,
        ErrorKind::OutOfMemory => 4,
        ErrorKind::FatalError => 5,
        ErrorKind::RuntimeError => 6,
        ErrorKind::BadVersion => 7,
        ErrorKind::IllegalState => 8,
        ErrorKind::FileError => 9,
    }
}

static EXCEPTION_TABLE: OnceLock<ExceptionTable> = OnceLock::new();

/// One-time library initialization, called by the host runtime's load hook.
///
/// Publishes the exception class table. The table is built completely
/// before it becomes visible, so a failure cannot leave partial state, and
/// repeated calls are no-ops.
pub fn on_load() {
    if EXCEPTION_TABLE.set(ExceptionTable::build()).is_ok() {
        tracing::debug!("boundary layer initialized");
    }
}

/// Resolves the host exception class for a kind.
///
/// Falls back to building the table if [`on_load`] was never called.
#[must_use]
pub fn host_class(kind: ErrorKind) -> &'static str {
    EXCEPTION_TABLE
        .get_or_init(ExceptionTable::build)
        .class(kind)
}

/// Maps an engine failure to the one kind it surfaces as.
///
/// Total over every [`EngineError`]: recognized categories map one-to-one,
/// anything else becomes `RuntimeError` so no failure is ever lost.
#[must_use]
pub fn classify(failure: &EngineError) -> ErrorKind {
    match failure {
        EngineError::BadVersion => ErrorKind::BadVersion,
        EngineError::FileAccess { .. } | EngineError::FileNotFound { .. } => ErrorKind::FileError,
        EngineError::OutOfMemory => ErrorKind::OutOfMemory,
        EngineError::InvalidArgument { .. } => ErrorKind::IllegalArgument,
        EngineError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
        EngineError::Unsupported { .. } => ErrorKind::UnsupportedOperation,
        _ => ErrorKind::RuntimeError,
    }
}

// Lets dispatch stubs bubble engine failures with `?` inside `protect`.
impl From<EngineError> for BoundaryError {
    fn from(failure: EngineError) -> Self {
        BoundaryError::new(classify(&failure), failure.to_string())
    }
}

/// Translates an engine failure into a host exception.
///
/// Deterministic and total; never panics. The message is carried verbatim
/// for unrecognized failures. The call site (captured via
/// `#[track_caller]`) is logged, not shown to the host.
#[track_caller]
#[must_use]
pub fn convert(failure: &EngineError) -> HostException {
    let location = Location::caller();
    let kind = classify(failure);
    tracing::error!(
        %failure,
        %kind,
        file = location.file(),
        line = location.line(),
        "engine call failed"
    );
    HostException::new(kind, failure.to_string())
}

/// Translates a caught panic payload into a host exception.
///
/// String payloads become `RuntimeError` with the panic text; opaque
/// payloads become `FatalError`, which the host should treat as
/// unrecoverable for this engine instance.
#[must_use]
pub fn convert_panic(payload: &(dyn Any + Send)) -> HostException {
    if let Some(message) = payload.downcast_ref::<&str>() {
        HostException::new(ErrorKind::RuntimeError, *message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        HostException::new(ErrorKind::RuntimeError, message.clone())
    } else {
        HostException::new(ErrorKind::FatalError, "unexpected native panic")
    }
}

// Per-thread pending exception, mirroring the host runtime's own
// pending-exception semantics: the first raise wins until a stub drains it.
thread_local! {
    static PENDING: RefCell<Option<HostException>> = const { RefCell::new(None) };
}

/// Raises a host exception of the given kind.
pub fn raise(kind: ErrorKind, message: impl Into<String>) {
    deliver(HostException::new(kind, message));
}

/// Raises a host exception naming the offending item.
pub fn raise_for(kind: ErrorKind, message: impl Into<String>, item: impl Into<String>) {
    let message = format!("{}: {}", message.into(), item.into());
    deliver(HostException::new(kind, message));
}

/// Raises the host exception corresponding to a boundary error.
pub fn raise_error(err: &BoundaryError) {
    deliver(HostException::new(err.kind(), err.to_string()));
}

fn deliver(exception: HostException) {
    PENDING.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(existing) = slot.as_ref() {
            tracing::debug!(%existing, dropped = %exception, "exception already pending");
            return;
        }
        *slot = Some(exception);
    });
}

/// Takes the pending exception for this thread, if any.
#[must_use]
pub fn take_pending() -> Option<HostException> {
    PENDING.with(|slot| slot.borrow_mut().take())
}

/// Returns true if an exception is pending on this thread.
#[must_use]
pub fn has_pending() -> bool {
    PENDING.with(|slot| slot.borrow().is_some())
}

/// Clears the pending exception for this thread.
pub fn clear_pending() {
    PENDING.with(|slot| *slot.borrow_mut() = None);
}

/// Runs a stub body, funneling every failure through one conversion point.
///
/// Returns the value on success. On a `BoundaryError` return or a panic,
/// raises the corresponding host exception and returns `None`; nothing
/// unwinds past this function.
pub fn protect<T>(f: impl FnOnce() -> BoundaryResult<T>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            raise_error(&err);
            None
        }
        Err(payload) => {
            let exception = convert_panic(payload.as_ref());
            tracing::error!(%exception, "panic caught at boundary");
            deliver(exception);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_load_is_idempotent() {
        on_load();
        on_load();
        assert_eq!(
            host_class(ErrorKind::IllegalState),
            "java/lang/IllegalStateException"
        );
    }

    #[test]
    fn every_kind_has_a_class() {
        for kind in ErrorKind::ALL {
            assert!(!host_class(kind).is_empty(), "no class for {kind}");
        }
    }

    #[test]
    fn known_engine_errors_map_one_to_one() {
        let cases = [
            (EngineError::BadVersion, ErrorKind::BadVersion),
            (EngineError::file_access("lock file"), ErrorKind::FileError),
            (
                EngineError::FileNotFound {
                    path: "/tmp/x.rivet".into(),
                },
                ErrorKind::FileError,
            ),
            (EngineError::OutOfMemory, ErrorKind::OutOfMemory),
            (
                EngineError::invalid_argument("bad key"),
                ErrorKind::IllegalArgument,
            ),
            (
                EngineError::IndexOutOfBounds { index: 4, size: 2 },
                ErrorKind::IndexOutOfBounds,
            ),
            (
                EngineError::unsupported("full-text search"),
                ErrorKind::UnsupportedOperation,
            ),
        ];
        for (failure, kind) in cases {
            let exception = convert(&failure);
            assert_eq!(exception.class(), host_class(kind), "{failure}");
        }
    }

    #[test]
    fn unrecognized_failure_preserves_message_verbatim() {
        let failure = EngineError::internal("mmap section went away");
        let exception = convert(&failure);
        assert_eq!(exception.class(), host_class(ErrorKind::RuntimeError));
        assert_eq!(exception.message(), "mmap section went away");
    }

    #[test]
    fn panic_with_string_payload_becomes_runtime_error() {
        clear_pending();
        let result: Option<()> = protect(|| panic!("checksum mismatch in page 7"));
        assert!(result.is_none());
        let pending = take_pending().unwrap();
        assert_eq!(pending.class(), host_class(ErrorKind::RuntimeError));
        assert_eq!(pending.message(), "checksum mismatch in page 7");
    }

    #[test]
    fn opaque_panic_payload_becomes_fatal() {
        let exception = convert_panic(&42_u32);
        assert_eq!(exception.class(), host_class(ErrorKind::FatalError));
    }

    #[test]
    fn engine_error_bubbles_through_protect() {
        clear_pending();
        let result: Option<()> = protect(|| {
            Err(EngineError::BadVersion)?;
            Ok(())
        });
        assert!(result.is_none());
        let pending = take_pending().unwrap();
        assert_eq!(pending.class(), host_class(ErrorKind::BadVersion));
    }

    #[test]
    fn protect_passes_values_through() {
        clear_pending();
        let result = protect(|| Ok(21 * 2));
        assert_eq!(result, Some(42));
        assert!(!has_pending());
    }

    #[test]
    fn first_raise_wins() {
        clear_pending();
        raise(ErrorKind::IllegalState, "first");
        raise(ErrorKind::IllegalArgument, "second");
        let pending = take_pending().unwrap();
        assert_eq!(pending.message(), "first");
        assert!(take_pending().is_none());
    }

    #[test]
    fn raise_for_appends_item() {
        clear_pending();
        raise_for(ErrorKind::IllegalArgument, "column type mismatch", "age");
        let pending = take_pending().unwrap();
        assert_eq!(pending.message(), "column type mismatch: age");
    }
}
