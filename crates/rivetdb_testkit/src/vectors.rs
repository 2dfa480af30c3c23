//! Cross-language transcoding vectors.
//!
//! Fixed UTF-16/UTF-8 pairs shared with the host-side binding tests.
//! Every binding must produce these exact bytes; the modified-UTF-8 cases
//! (embedded NUL, astral-plane code points) are the ones a runtime-provided
//! converter gets wrong.

use rivetdb_boundary::string::{to_host_utf16, StringAccessor};

/// One transcoding test vector.
#[derive(Debug, Clone, Copy)]
pub struct TranscodingVector {
    /// What the vector exercises.
    pub description: &'static str,
    /// Host-side UTF-16 code units.
    pub host: &'static [u16],
    /// Expected proper UTF-8 bytes on the engine side.
    pub utf8: &'static [u8],
}

/// The shared vector set.
pub const TRANSCODING_VECTORS: &[TranscodingVector] = &[
    TranscodingVector {
        description: "ascii",
        host: &[0x0072, 0x0069, 0x0076, 0x0065, 0x0074],
        utf8: b"rivet",
    },
    TranscodingVector {
        description: "empty",
        host: &[],
        utf8: b"",
    },
    TranscodingVector {
        description: "embedded NUL stays one byte",
        host: &[0x0061, 0x0000, 0x0062],
        utf8: &[0x61, 0x00, 0x62],
    },
    TranscodingVector {
        description: "two-byte sequence",
        host: &[0x00E9],
        utf8: &[0xC3, 0xA9],
    },
    TranscodingVector {
        description: "three-byte sequence",
        host: &[0x20AC],
        utf8: &[0xE2, 0x82, 0xAC],
    },
    TranscodingVector {
        description: "surrogate pair becomes one four-byte sequence",
        host: &[0xD801, 0xDC00],
        utf8: &[0xF0, 0x90, 0x90, 0x80],
    },
    TranscodingVector {
        description: "musical symbol G clef",
        host: &[0xD834, 0xDD1E],
        utf8: &[0xF0, 0x9D, 0x84, 0x9E],
    },
];

/// Runs every vector through the accessor in both directions, panicking on
/// the first mismatch. Intended for binding test suites.
pub fn check_transcoding_vectors() {
    for vector in TRANSCODING_VECTORS {
        let accessor =
            StringAccessor::new(Some(vector.host)).expect("vector must transcode cleanly");
        let owned = accessor.as_owned_string();
        assert_eq!(
            owned.as_bytes(),
            vector.utf8,
            "host to engine: {}",
            vector.description
        );
        assert_eq!(
            to_host_utf16(&owned),
            vector.host,
            "engine to host: {}",
            vector.description
        );
    }
}
