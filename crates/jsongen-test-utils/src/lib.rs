#![deny(unsafe_code)]

//! Shared test utilities for the jsongen workspace.
//!
//! Provides config builders, registry fixtures, deterministic strength
//! sources, and a temp-dir export harness so crate tests stay short.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! jsongen-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod export;
pub mod fixtures;
pub mod strength;
pub mod tracing_setup;
