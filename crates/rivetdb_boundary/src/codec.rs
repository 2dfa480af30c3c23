//! Scalar and timestamp conversions across the boundary.
//!
//! Everything here is pure, stateless and total: no error paths, no
//! allocation. Values must be bit-exact against the reference host
//! binding, including its known imperfections.

use crate::engine::{ColumnKey, ObjKey, Timestamp, NOT_FOUND};

/// Converts an engine timestamp to host milliseconds.
///
/// Known limitation kept for wire compatibility: the multiplication can
/// wrap for timestamps far from the epoch. Wrapping arithmetic makes that
/// silent in every build profile, matching the reference binding.
#[must_use]
pub fn to_millis(ts: Timestamp) -> i64 {
    ts.seconds()
        .wrapping_mul(1000)
        .wrapping_add(i64::from(ts.nanoseconds()) / 1_000_000)
}

/// Converts host milliseconds to an engine timestamp.
///
/// Not a perfect inverse of [`to_millis`] for negative values that are not
/// multiples of 1000: the remainder keeps the dividend's sign, so the
/// nanosecond component comes out negative. Preserved as-is; see the
/// boundary-case test below.
#[must_use]
pub fn from_millis(millis: i64) -> Timestamp {
    let seconds = millis / 1000;
    let nanoseconds = ((millis % 1000) * 1_000_000) as i32;
    Timestamp::new(seconds, nanoseconds)
}

/// Maps an engine index to the host, with `-1` for the not-found sentinel.
///
/// A zero index is a real position and passes through unchanged.
#[must_use]
pub fn index_to_i64(index: usize) -> i64 {
    if index == NOT_FOUND {
        -1
    } else {
        index as i64
    }
}

/// Maps an optional column key to the host, with `-1` for absent.
#[must_use]
pub fn column_key_to_i64(key: Option<ColumnKey>) -> i64 {
    key.map_or(-1, |k| k.as_u64() as i64)
}

/// Maps an optional object key to the host, with `-1` for absent.
#[must_use]
pub fn object_key_to_i64(key: Option<ObjKey>) -> i64 {
    key.map_or(-1, |k| k.as_u64() as i64)
}

/// Decodes a host boolean; the host binding only ever passes `0` or `1`.
#[must_use]
pub fn from_host_bool(value: u8) -> bool {
    value == 1
}

/// Encodes a boolean in the host's canonical form.
#[must_use]
pub fn to_host_bool(value: bool) -> u8 {
    u8::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip_for_positive_multiples() {
        for millis in [0_i64, 1000, 2000, 1_600_000_000_000] {
            assert_eq!(to_millis(from_millis(millis)), millis);
        }
    }

    #[test]
    fn to_millis_splits_seconds_and_nanos() {
        let ts = Timestamp::new(3, 250_000_000);
        assert_eq!(to_millis(ts), 3250);
    }

    #[test]
    fn sub_millisecond_nanos_truncate() {
        let ts = Timestamp::new(0, 999_999);
        assert_eq!(to_millis(ts), 0);
    }

    #[test]
    fn negative_non_multiple_asymmetry_is_preserved() {
        // Boundary case, not a round trip: -1500 ms splits into -1 s and
        // -500'000'000 ns because the remainder keeps the dividend's sign.
        // The reference binding behaves the same way; if this test starts
        // failing, wire compatibility broke.
        let ts = from_millis(-1500);
        assert_eq!(ts.seconds(), -1);
        assert_eq!(ts.nanoseconds(), -500_000_000);
        assert_eq!(to_millis(ts), -1500);
    }

    #[test]
    fn far_future_wraps_instead_of_panicking() {
        let ts = Timestamp::new(i64::MAX, 0);
        // Value is meaningless, but the conversion must stay total.
        let _ = to_millis(ts);
    }

    #[test]
    fn index_sentinel_table() {
        assert_eq!(index_to_i64(NOT_FOUND), -1);
        assert_eq!(index_to_i64(0), 0);
        assert_eq!(index_to_i64(42), 42);
    }

    #[test]
    fn key_sentinels() {
        assert_eq!(column_key_to_i64(None), -1);
        assert_eq!(column_key_to_i64(Some(ColumnKey::new(9))), 9);
        assert_eq!(object_key_to_i64(None), -1);
        assert_eq!(object_key_to_i64(Some(ObjKey::new(0))), 0);
    }

    #[test]
    fn bool_conversions_are_bijective() {
        assert!(from_host_bool(to_host_bool(true)));
        assert!(!from_host_bool(to_host_bool(false)));
        assert_eq!(to_host_bool(true), 1);
        assert_eq!(to_host_bool(false), 0);
    }

    mod properties {
        use super::super::{from_millis, index_to_i64, to_millis};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn whole_second_millis_round_trip(seconds in 0_i64..9_000_000_000) {
                let millis = seconds * 1000;
                prop_assert_eq!(to_millis(from_millis(millis)), millis);
            }

            #[test]
            fn valid_indices_pass_through(index in 0_usize..(i64::MAX as usize)) {
                prop_assert_eq!(index_to_i64(index), index as i64);
            }

            #[test]
            fn from_millis_never_loses_milliseconds(millis in any::<i64>()) {
                prop_assert_eq!(to_millis(from_millis(millis)), millis);
            }
        }
    }
}
