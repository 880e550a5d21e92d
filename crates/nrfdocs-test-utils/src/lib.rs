#![deny(unsafe_code)]

//! Shared test utilities for the nrfdocs workspace.
//!
//! Provides reusable fixtures, config builders, stub answer sources, and
//! tracing helpers so that individual crate tests stay concise and
//! consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! nrfdocs-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod source;
pub mod tracing_setup;
