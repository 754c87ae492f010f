//! Registry metrics.
//!
//! Counters and histograms for registry mutations and bootstrap scans. These
//! complement the structured logs; no recorder is installed by this crate.

use metrics::{counter, describe_counter, describe_histogram, histogram};

use crate::artefact::ArtefactKind;

/// Successful registrations, labelled by kind and mode (`checked` / `reserved`).
pub const REGISTRATIONS: &str = "artefact_registrations_total";

/// Successful deletions, labelled by kind.
pub const DELETIONS: &str = "artefact_deletions_total";

/// Entries found by a bootstrap scan or refresh, labelled by kind.
pub const SCAN_ENTRIES: &str = "artefact_scan_entries";

/// Backend failures surfaced by the registry, labelled by kind and operation.
pub const BACKEND_ERRORS: &str = "artefact_backend_errors_total";

/// Registers all registry metric descriptions.
///
/// Call this once at application startup after initializing the metrics recorder.
pub fn register_metrics() {
    describe_counter!(REGISTRATIONS, "Total artefacts registered or reserved");
    describe_counter!(DELETIONS, "Total artefacts deleted");
    describe_histogram!(SCAN_ENTRIES, "Artefacts found per registry scan");
    describe_counter!(BACKEND_ERRORS, "Total backend failures surfaced by registries");
}

/// Records a successful registration.
pub fn record_registration(kind: ArtefactKind, mode: &'static str) {
    counter!(REGISTRATIONS, "kind" => kind.as_str(), "mode" => mode).increment(1);
}

/// Records a successful deletion.
pub fn record_deletion(kind: ArtefactKind) {
    counter!(DELETIONS, "kind" => kind.as_str()).increment(1);
}

/// Records the size of a scan result.
#[allow(clippy::cast_precision_loss)]
pub fn record_scan(kind: ArtefactKind, entries: usize) {
    histogram!(SCAN_ENTRIES, "kind" => kind.as_str()).record(entries as f64);
}

/// Records a backend failure.
pub fn record_backend_error(kind: ArtefactKind, operation: &'static str) {
    counter!(BACKEND_ERRORS, "kind" => kind.as_str(), "operation" => operation).increment(1);
}
