//! Report persistence.
//!
//! The pipeline hands rendered text to a narrow storage adapter: existence
//! check, create, overwrite. The write is a full replacement; a report never
//! preserves prior hand-edits.

use crate::error::IndexerError;
use std::path::PathBuf;

pub trait StorageAdapter {
    fn exists(&self, path: &str) -> bool;
    fn create(&mut self, path: &str, content: &str) -> Result<(), IndexerError>;
    fn overwrite(&mut self, path: &str, content: &str) -> Result<(), IndexerError>;
}

/// Create the document at `path` or replace its content entirely.
pub fn upsert(
    storage: &mut dyn StorageAdapter,
    path: &str,
    content: &str,
) -> Result<(), IndexerError> {
    if storage.exists(path) {
        storage.overwrite(path, content)
    } else {
        storage.create(path, content)
    }
}

/// Filesystem adapter rooted at the vault directory.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(crate::utils::normalize_path(path))
    }

    fn write(&self, path: &str, content: &str, create_dirs: bool) -> Result<(), IndexerError> {
        let full = self.full_path(path);
        let io = |source| IndexerError::Storage { path: path.to_string(), source };
        if create_dirs {
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).map_err(&io)?;
            }
        }
        std::fs::write(&full, content).map_err(io)
    }
}

impl StorageAdapter for FsStorage {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).exists()
    }

    fn create(&mut self, path: &str, content: &str) -> Result<(), IndexerError> {
        self.write(path, content, true)
    }

    fn overwrite(&mut self, path: &str, content: &str) -> Result<(), IndexerError> {
        self.write(path, content, false)
    }
}

/// In-memory adapter for pipeline tests.
#[cfg(test)]
pub mod fake {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Default)]
    pub struct MemStorage {
        pub files: BTreeMap<String, String>,
        pub fail_writes: bool,
    }

    impl StorageAdapter for MemStorage {
        fn exists(&self, path: &str) -> bool {
            self.files.contains_key(path)
        }

        fn create(&mut self, path: &str, content: &str) -> Result<(), IndexerError> {
            self.overwrite(path, content)
        }

        fn overwrite(&mut self, path: &str, content: &str) -> Result<(), IndexerError> {
            if self.fail_writes {
                return Err(IndexerError::Storage {
                    path: path.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.files.insert(path.to_string(), content.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn upsert_creates_then_overwrites() {
        let tmp = TempDir::new().expect("tmp");
        let mut storage = FsStorage::new(tmp.path());

        upsert(&mut storage, "out/report.md", "first").expect("create");
        assert_eq!(std::fs::read_to_string(tmp.path().join("out/report.md")).unwrap(), "first");

        upsert(&mut storage, "out/report.md", "second").expect("overwrite");
        assert_eq!(std::fs::read_to_string(tmp.path().join("out/report.md")).unwrap(), "second");
    }

    #[test]
    fn failed_write_surfaces_storage_error() {
        let mut storage = fake::MemStorage { fail_writes: true, ..Default::default() };
        let err = upsert(&mut storage, "report.md", "content").unwrap_err();
        assert!(matches!(err, crate::error::IndexerError::Storage { .. }));
    }
}
