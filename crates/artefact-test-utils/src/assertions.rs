//! Custom assertion helpers for integration tests.

use crate::storage::StorageOp;

/// Asserts that `path` was removed exactly once, recursively.
///
/// # Panics
///
/// Panics if there is not exactly one removal of `path`, or if it was not recursive.
pub fn assert_removed_once(ops: &[StorageOp], path: &str) {
    let removals: Vec<_> = ops
        .iter()
        .filter(|op| matches!(op, StorageOp::Remove { .. }) && op.path() == path)
        .collect();

    assert_eq!(
        removals.len(),
        1,
        "Expected exactly one removal of {path}, found {removals:?}"
    );
    assert!(
        matches!(removals[0], StorageOp::Remove { recursive: true, .. }),
        "Expected removal of {path} to be recursive"
    );
}

/// Asserts that no removal was issued.
///
/// # Panics
///
/// Panics if any remove operation was recorded.
pub fn assert_no_removals(ops: &[StorageOp]) {
    let removals: Vec<_> = ops
        .iter()
        .filter(|op| matches!(op, StorageOp::Remove { .. }))
        .collect();
    assert!(removals.is_empty(), "Unexpected removals: {removals:?}");
}

/// Asserts that storage operations contain expected patterns.
///
/// Each expectation is `(operation name, path prefix)`.
///
/// # Panics
///
/// Panics if expected operations are not found.
pub fn assert_storage_ops_contain(ops: &[StorageOp], expected: &[(&str, &str)]) {
    for (op_name, path_prefix) in expected {
        let found = ops
            .iter()
            .any(|op| op.name() == *op_name && op.path().starts_with(path_prefix));
        assert!(
            found,
            "Expected {op_name} operation on path starting with '{path_prefix}', not found in {ops:?}",
        );
    }
}
