//! # findex Testkit
//!
//! Test utilities for findex.
//!
//! This crate provides:
//! - Sample record sets, prebuilt engines and temporary snapshot stores
//! - Property-based test generators using proptest
//! - A brute-force query oracle to check the engine against
//!
//! ## Usage
//!
//! ```rust,ignore
//! use findex_testkit::prelude::*;
//!
//! #[test]
//! fn finds_alice() {
//!     let engine = people_engine();
//!     let found = engine.find(&word_eq("name", "alice")).unwrap();
//!     assert_eq!(names_of(&found), ["Alice"]);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
