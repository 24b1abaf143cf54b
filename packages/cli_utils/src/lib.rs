#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the Gazeta toolchain.
//!
//! Provides [`init_logger`], which every binary calls at startup, and the
//! [`site`] configuration that replaces the per-revision tweaks the site
//! scripts used to fork on (edition number, loading-screen timing,
//! sidebar, card animation).

pub mod site;

/// Initializes the global `pretty_env_logger` logger from `RUST_LOG`.
///
/// Calling it twice is harmless: the second call is ignored (e.g., in
/// tests).
pub fn init_logger() {
    if pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
}
