//! Shared test utilities for artefact catalog integration tests.
//!
//! This crate provides:
//! - [`TracingMemoryBackend`]: In-memory storage with operation recording
//! - [`TestContext`]: Pre-configured lake root over a tracing backend
//! - Factory functions for seeding backends
//! - Custom assertion helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use artefact_test_utils::{TestContext, assert_removed_once};
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let ctx = TestContext::new().with_lake_layout();
//!     ctx.add_dataset("events");
//!     // ... open a registry over ctx.backend() and delete "events" ...
//!     assert_removed_once(&ctx.storage.operations(), "lake/datasets/events");
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
// Test utilities use expect/unwrap for cleaner test code - panics are acceptable in tests
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod assertions;
pub mod fixtures;
pub mod storage;

pub use assertions::*;
pub use fixtures::*;
pub use storage::*;

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("artefact_catalog=debug".parse().expect("valid directive")),
        )
        .with_test_writer()
        .try_init();
}
