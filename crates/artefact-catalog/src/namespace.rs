//! Namespace markers for registries.
//!
//! A namespace fixes two things about a [`Registry`](crate::Registry): the
//! kind of artefact it holds, and the rule its bootstrap scan uses to turn
//! backend entries under the root path into named artefacts. Everything else
//! is shared by the one generic registry engine.
//!
//! | Marker | Kind | Scan admits |
//! |--------|------|-------------|
//! | [`Datasets`] | `Dataset` | directories |
//! | [`Models`] | `Model` | directories |
//! | [`Others`] | `Other` | directories and files |

use artefact_core::path;

use crate::artefact::ArtefactKind;

/// Rules for one family of artefacts.
pub trait Namespace: Send + Sync + 'static {
    /// Kind given to every artefact in this namespace.
    const KIND: ArtefactKind;

    /// Returns whether a backend entry found by the scan becomes an artefact.
    fn admits(is_directory: bool) -> bool {
        is_directory
    }

    /// Derives the registry name for a scanned path.
    ///
    /// Defaults to the final path segment. `None` skips the entry.
    fn entry_name(path: &str) -> Option<String> {
        path::file_name(path).map(str::to_string)
    }
}

/// Dataset directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Datasets;

impl Namespace for Datasets {
    const KIND: ArtefactKind = ArtefactKind::Dataset;
}

/// Model directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Models;

impl Namespace for Models {
    const KIND: ArtefactKind = ArtefactKind::Model;
}

/// Other derived objects. Single files (a metrics JSON, a report) count too.
#[derive(Debug, Clone, Copy, Default)]
pub struct Others;

impl Namespace for Others {
    const KIND: ArtefactKind = ArtefactKind::Other;

    fn admits(_is_directory: bool) -> bool {
        true
    }
}
