//! # artefact-core
//!
//! Core abstractions shared by the artefact catalog crates.
//!
//! This crate provides:
//!
//! - **Storage Backend**: The capability trait the catalog consumes
//!   (`exists`, `list`, `is_directory`, `remove`, `create_dir`)
//! - **Backends**: An in-memory tree for tests and a local filesystem backend
//! - **Path Helpers**: Root-plus-name joining and final-segment extraction
//! - **Error Types**: Shared error definitions and result types
//! - **Observability**: Logging initialization and span helpers
//! - **Configuration**: Environment-driven lake settings
//!
//! ## Example
//!
//! ```rust
//! use artefact_core::prelude::*;
//!
//! let backend = MemoryBackend::new();
//! backend.put_file("lake/datasets/events/part-0.parquet", "rows")?;
//! # Ok::<(), artefact_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod local;
pub mod observability;
pub mod path;
pub mod storage;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use artefact_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::local::LocalFileSystemBackend;
    pub use crate::storage::{MemoryBackend, StorageBackend};
}

// Re-export key types at crate root for ergonomics
pub use config::LakeConfig;
pub use error::{Error, Result};
pub use local::LocalFileSystemBackend;
pub use observability::{LogFormat, init_logging, init_logging_with};
pub use storage::{MemoryBackend, StorageBackend};
