//! Test utilities for Strata development.
//!
//! Provides byte-pattern and key fixtures (see [`fixtures`]) and
//! [`expect_fatal`] for asserting on the fatal-error tier.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{colliding_keys, marker_pattern, numbered_keys};

use strata_core::{catch_fatal, Fatal};

/// Run `f` and return the [`Fatal`] it raised.
///
/// # Panics
///
/// Panics if `f` returns normally.
#[track_caller]
pub fn expect_fatal<R>(f: impl FnOnce() -> R) -> Fatal {
    match catch_fatal(f) {
        Ok(_) => panic!("expected a fatal error, but the call returned"),
        Err(err) => err,
    }
}
