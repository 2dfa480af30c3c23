//! Host string marshaling.
//!
//! The host runtime hands strings across the boundary as UTF-16 code
//! units. Its built-in converters produce a modified UTF-8: U+0000 comes
//! out as the two-byte sequence `0xC0 0x80`, and code points above U+FFFF
//! come out as two separate three-byte encodings of the surrogate halves.
//! The engine stores proper UTF-8, so relying on those converters would
//! silently corrupt embedded NULs and anything outside the BMP. The
//! transcoding happens here instead.

use crate::engine::{NativeStr, MAX_STRING_SIZE};
use crate::error::{BoundaryError, BoundaryResult};

/// Owns a host string transcoded to the engine's UTF-8 representation.
///
/// Transcoding happens eagerly at construction. The buffer is exclusively
/// owned by the accessor; [`NativeStr`] views borrow from it and cannot
/// outlive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringAccessor {
    // None is the null host string, distinct from Some("").
    data: Option<Box<str>>,
}

impl StringAccessor {
    /// Transcodes a host string; `None` is the null string.
    ///
    /// Fails with `IllegalArgument` if the code units are not well-formed
    /// UTF-16.
    pub fn new(host: Option<&[u16]>) -> BoundaryResult<Self> {
        match host {
            None => Ok(Self::null()),
            Some(units) => transcode(units).map(|data| Self { data: Some(data) }),
        }
    }

    /// The accessor for the null host string.
    #[must_use]
    pub fn null() -> Self {
        Self { data: None }
    }

    /// True for the null host string.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// True if the string is null or transcoded to zero bytes.
    #[must_use]
    pub fn is_null_or_empty(&self) -> bool {
        self.data.as_deref().map_or(true, str::is_empty)
    }

    /// Transcoded byte length; zero for the null string.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_deref().map_or(0, str::len)
    }

    /// True if [`len`](Self::len) is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero-copy view in the engine's representation.
    ///
    /// The engine's size cap is checked here rather than at construction:
    /// not every accessor's string is passed to a size-constrained engine
    /// API, and the owned-string path has no such limit. Fails with
    /// `IllegalArgument` when the transcoded length exceeds
    /// [`MAX_STRING_SIZE`].
    pub fn as_native_view(&self) -> BoundaryResult<NativeStr<'_>> {
        match self.data.as_deref() {
            None => Ok(NativeStr::null()),
            Some(data) if data.len() > MAX_STRING_SIZE => {
                Err(BoundaryError::illegal_argument(format!(
                    "The length of the string in UTF-8 encoding is {} which exceeds the max string length {}.",
                    data.len(),
                    MAX_STRING_SIZE
                )))
            }
            Some(data) => Ok(NativeStr::new(data)),
        }
    }

    /// Owned copy for logging and display; the null string yields empty.
    #[must_use]
    pub fn as_owned_string(&self) -> String {
        self.data.as_deref().unwrap_or_default().to_owned()
    }
}

fn transcode(units: &[u16]) -> BoundaryResult<Box<str>> {
    let mut out = String::with_capacity(units.len());
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => out.push(c),
            Err(e) => {
                return Err(BoundaryError::illegal_argument(format!(
                    "host string is not well-formed UTF-16: unpaired surrogate 0x{:04X}",
                    e.unpaired_surrogate()
                )))
            }
        }
    }
    Ok(out.into_boxed_str())
}

/// Encodes engine text back into host UTF-16 code units.
#[must_use]
pub fn to_host_utf16(data: &str) -> Vec<u16> {
    data.encode_utf16().collect()
}

/// Encodes a possibly-null engine string for the return path.
///
/// The null string maps back to the host's null, not to an empty string.
#[must_use]
pub fn to_host_string(data: NativeStr<'_>) -> Option<Vec<u16>> {
    data.as_str().map(to_host_utf16)
}
