//! Helpers for `/`-separated backend paths.
//!
//! Backends address objects by plain strings. These helpers keep the
//! root-plus-name convention in one place so callers never build paths by hand.

/// Path separator used by every backend.
pub const SEPARATOR: char = '/';

/// Joins a root path and a child name: `{root}/{name}`.
///
/// A trailing separator on `root` is not doubled.
///
/// # Example
///
/// ```rust
/// use artefact_core::path::join;
///
/// assert_eq!(join("lake/datasets", "events"), "lake/datasets/events");
/// assert_eq!(join("lake/datasets/", "events"), "lake/datasets/events");
/// ```
#[must_use]
pub fn join(root: &str, name: &str) -> String {
    let trimmed = root.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && root.starts_with(SEPARATOR) {
        return format!("{SEPARATOR}{name}");
    }
    format!("{trimmed}{SEPARATOR}{name}")
}

/// Returns the final segment of a path (the component after the last `/`).
///
/// Trailing separators are ignored. Returns `None` for an empty final segment.
///
/// # Example
///
/// ```rust
/// use artefact_core::path::file_name;
///
/// assert_eq!(file_name("lake/datasets/events"), Some("events"));
/// assert_eq!(file_name("lake/datasets/events/"), Some("events"));
/// assert_eq!(file_name("/"), None);
/// ```
#[must_use]
pub fn file_name(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches(SEPARATOR);
    let name = trimmed.rsplit(SEPARATOR).next().unwrap_or(trimmed);
    (!name.is_empty()).then_some(name)
}

/// Returns the parent of a path, or `None` for a single-segment path.
#[must_use]
pub fn parent(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches(SEPARATOR);
    match trimmed.rfind(SEPARATOR) {
        Some(0) => Some("/"),
        Some(idx) => Some(&trimmed[..idx]),
        None => None,
    }
}

/// Normalizes a path by removing trailing separators (except for `/` itself).
#[must_use]
pub fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && path.starts_with(SEPARATOR) {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_absolute_root() {
        assert_eq!(join("/", "a"), "/a");
        assert_eq!(join("/data", "a"), "/data/a");
    }

    #[test]
    fn file_name_of_single_segment() {
        assert_eq!(file_name("events"), Some("events"));
        assert_eq!(file_name(""), None);
    }

    #[test]
    fn parent_walks_up_one_level() {
        assert_eq!(parent("root/a/b"), Some("root/a"));
        assert_eq!(parent("root/a/"), Some("root"));
        assert_eq!(parent("/a"), Some("/"));
        assert_eq!(parent("root"), None);
    }

    #[test]
    fn normalize_strips_trailing_separator() {
        assert_eq!(normalize("root/a/"), "root/a");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("root"), "root");
    }
}
