//! # RivetDB Testkit
//!
//! Test utilities for the RivetDB boundary layer.
//!
//! This crate provides:
//! - A mock engine implementing the introspection traits
//! - Property-based test generators using proptest
//! - Cross-language transcoding vectors
//! - Integration scenarios exercising the full dispatch-stub call path
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rivetdb_testkit::prelude::*;
//!
//! #[test]
//! fn detached_table_is_rejected() {
//!     let table = MockTable::new();
//!     table.detach();
//!     assert!(rivetdb_boundary::validate_table(&table).is_err());
//! }
//! ```

pub mod generators;
pub mod integration;
pub mod mock;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::mock::*;
    pub use crate::vectors::*;
}

pub use generators::*;
pub use integration::*;
pub use mock::*;
pub use vectors::*;
