//! Property-based test generators using proptest.
//!
//! Strategies biased toward the inputs that break naive marshaling:
//! embedded NULs, code points above U+FFFF, sentinel indices, timestamps
//! near the representable edges.

use proptest::prelude::*;
use rivetdb_boundary::engine::{Timestamp, NOT_FOUND};

/// Strategy for host text, biased toward transcoding-hostile content.
///
/// Plain arbitrary strings are mixed with strings salted with embedded
/// NULs and astral-plane code points, the two cases the host runtime's own
/// converters corrupt.
pub fn host_text_strategy() -> impl Strategy<Value = String> {
    let salted = (any::<String>(), any::<String>()).prop_map(|(a, b)| {
        let mut s = a;
        s.push('\0');
        s.push('\u{10400}');
        s.push_str(&b);
        s.push('\u{1D11E}');
        s
    });
    prop_oneof![
        3 => any::<String>(),
        2 => salted,
        1 => Just(String::new()),
    ]
}

/// Strategy for host strings already encoded as UTF-16 code units.
pub fn host_units_strategy() -> impl Strategy<Value = Vec<u16>> {
    host_text_strategy().prop_map(|s| s.encode_utf16().collect())
}

/// Strategy for timestamps whose millisecond form does not overflow.
pub fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (
        -9_000_000_000_000_i64..9_000_000_000_000_i64,
        0..1_000_000_000_i32,
    )
        .prop_map(|(seconds, nanoseconds)| Timestamp::new(seconds, nanoseconds))
}

/// Strategy for millisecond values that are non-negative multiples of 1000.
pub fn whole_second_millis_strategy() -> impl Strategy<Value = i64> {
    (0_i64..9_000_000_000_000).prop_map(|m| (m / 1000) * 1000)
}

/// Strategy for raw engine indices, including the not-found sentinel.
pub fn raw_index_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        4 => 0_usize..(i64::MAX as usize),
        1 => Just(NOT_FOUND),
        1 => Just(0_usize),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivetdb_boundary::codec::{from_millis, index_to_i64, to_millis};
    use rivetdb_boundary::string::{to_host_string, StringAccessor};

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn transcoding_round_trips(text in host_text_strategy()) {
            let host: Vec<u16> = text.encode_utf16().collect();
            let accessor = StringAccessor::new(Some(&host)).unwrap();

            prop_assert_eq!(accessor.as_owned_string(), text.clone());

            let view = accessor.as_native_view().unwrap();
            prop_assert_eq!(view.as_str(), Some(text.as_str()));
            prop_assert_eq!(to_host_string(view).unwrap(), host);
        }

        #[test]
        fn whole_second_millis_round_trip(millis in whole_second_millis_strategy()) {
            prop_assert_eq!(to_millis(from_millis(millis)), millis);
        }

        #[test]
        fn timestamps_survive_to_millis_within_range(ts in timestamp_strategy()) {
            let millis = to_millis(ts);
            let back = from_millis(millis);
            // Millisecond precision is the wire contract; sub-millisecond
            // nanoseconds are truncated.
            prop_assert_eq!(to_millis(back), millis);
        }

        #[test]
        fn index_sentinel_is_the_only_negative(index in raw_index_strategy()) {
            let mapped = index_to_i64(index);
            if index == NOT_FOUND {
                prop_assert_eq!(mapped, -1);
            } else {
                prop_assert!(mapped >= 0);
                prop_assert_eq!(mapped as usize, index);
            }
        }
    }
}
