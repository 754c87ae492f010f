//! Local filesystem storage backend.
//!
//! Maps backend paths directly onto the host filesystem through `tokio::fs`.
//! Relative paths resolve against the process working directory, the same
//! way the CLI receives them.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Error, Result};
use crate::storage::StorageBackend;

/// Storage backend over the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystemBackend;

impl LocalFileSystemBackend {
    /// Creates a new local filesystem backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn map_io(operation: &str, path: &str, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::NotFound(path.to_string())
    } else {
        Error::storage_with_source(format!("{operation} failed for {path}"), err)
    }
}

#[async_trait]
impl StorageBackend for LocalFileSystemBackend {
    async fn exists(&self, path: &str) -> Result<bool> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| map_io("exists", path, e))
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path)
            .await
            .map_err(|e| map_io("list", path, e))?;

        let mut children = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| map_io("list", path, e))?
        {
            // Backend paths are strings; a lossy name would address another object.
            match entry.file_name().into_string() {
                Ok(name) => children.push(crate::path::join(path, &name)),
                Err(raw) => warn!(dir = path, name = ?raw, "skipping entry with non-UTF-8 name"),
            }
        }
        Ok(children)
    }

    async fn is_directory(&self, path: &str) -> Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io("is_directory", path, e)),
        }
    }

    async fn remove(&self, path: &str, recursive: bool) -> Result<()> {
        let meta = tokio::fs::symlink_metadata(path)
            .await
            .map_err(|e| map_io("remove", path, e))?;

        if !meta.is_dir() {
            return tokio::fs::remove_file(path)
                .await
                .map_err(|e| map_io("remove", path, e));
        }

        if recursive {
            return tokio::fs::remove_dir_all(path)
                .await
                .map_err(|e| map_io("remove", path, e));
        }

        let mut entries = tokio::fs::read_dir(path)
            .await
            .map_err(|e| map_io("remove", path, e))?;
        if entries
            .next_entry()
            .await
            .map_err(|e| map_io("remove", path, e))?
            .is_some()
        {
            return Err(Error::precondition(format!("directory not empty: {path}")));
        }
        tokio::fs::remove_dir(path)
            .await
            .map_err(|e| map_io("remove", path, e))
    }

    async fn create_dir(&self, path: &str) -> Result<()> {
        if let Some(file) = file_in_ancestry(path).await {
            return Err(Error::precondition(format!(
                "a file occupies directory path: {}",
                file.display()
            )));
        }
        tokio::fs::create_dir_all(path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                Error::precondition(format!("a file occupies directory path: {path}"))
            } else {
                map_io("create_dir", path, e)
            }
        })
    }
}

/// Returns the nearest non-directory entry on `path` or its ancestors.
///
/// Stops at the first existing directory. Lookup failures (missing entries,
/// `ENOTDIR` below a file) move on to the parent.
async fn file_in_ancestry(path: &str) -> Option<PathBuf> {
    for ancestor in Path::new(path).ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        match tokio::fs::metadata(ancestor).await {
            Ok(meta) if meta.is_dir() => return None,
            Ok(_) => return Some(ancestor.to_path_buf()),
            Err(_) => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_of(dir: &tempfile::TempDir) -> String {
        dir.path().to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_list_and_is_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = root_of(&dir);
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("c.txt"), b"c").unwrap();

        let backend = LocalFileSystemBackend::new();
        let mut children = backend.list(&root).await.expect("list should succeed");
        children.sort();

        assert_eq!(
            children,
            vec![
                format!("{root}/a"),
                format!("{root}/b"),
                format!("{root}/c.txt")
            ]
        );
        assert!(backend.is_directory(&children[0]).await.unwrap());
        assert!(!backend.is_directory(&children[2]).await.unwrap());
        assert!(!backend.is_directory(&format!("{root}/zzz")).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_paths_map_to_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = format!("{}/missing", root_of(&dir));
        let backend = LocalFileSystemBackend::new();

        assert!(!backend.exists(&missing).await.unwrap());
        assert!(backend.list(&missing).await.unwrap_err().is_not_found());
        assert!(backend.remove(&missing, true).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_remove_respects_recursive_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("dataset");
        std::fs::create_dir_all(target.join("year=2024")).unwrap();
        std::fs::write(target.join("year=2024/part-0"), b"rows").unwrap();
        let target = target.to_string_lossy().into_owned();

        let backend = LocalFileSystemBackend::new();
        let err = backend.remove(&target, false).await.unwrap_err();
        assert!(matches!(err, Error::PreconditionFailed { .. }));

        backend.remove(&target, true).await.expect("recursive remove");
        assert!(!backend.exists(&target).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_dir_creates_parents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = format!("{}/lake/datasets", root_of(&dir));
        let backend = LocalFileSystemBackend::new();

        backend.create_dir(&nested).await.expect("create_dir");
        backend.create_dir(&nested).await.expect("idempotent");
        assert!(backend.is_directory(&nested).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_dir_under_file_is_precondition_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("f"), b"x").unwrap();
        let backend = LocalFileSystemBackend::new();

        let on_file = format!("{}/f", root_of(&dir));
        let below_file = format!("{}/f/sub/deeper", root_of(&dir));

        let err = backend.create_dir(&on_file).await.unwrap_err();
        assert!(matches!(err, Error::PreconditionFailed { .. }), "got {err:?}");
        let err = backend.create_dir(&below_file).await.unwrap_err();
        assert!(matches!(err, Error::PreconditionFailed { .. }), "got {err:?}");
        assert!(err.to_string().ends_with("/f"), "{err}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join(OsStr::from_bytes(b"ds\xfe"))).unwrap();
        std::fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.json")), b"{}").unwrap();
        std::fs::create_dir(dir.path().join("ok")).unwrap();
        let root = root_of(&dir);

        let backend = LocalFileSystemBackend::new();
        let children = backend.list(&root).await.expect("list should succeed");

        assert_eq!(children, vec![format!("{root}/ok")]);
        for child in &children {
            assert!(backend.exists(child).await.unwrap(), "{child} must be real");
        }
    }
}
