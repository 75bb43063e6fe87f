//! Filesystem-backed storage implementation.

use crate::ObjectStorage;
use std::path::{Path, PathBuf};
use tankobon_core::ImageRef;
use tankobon_error::{StorageError, StorageErrorKind, TankobonResult};

/// Filesystem storage backend.
///
/// Stores objects as plain files under a root directory, mirroring the key
/// layout: `{root}/chapter/{manga}/{chapter}/{page}.webp`. Writes go to a
/// temp file first and are renamed into place so readers never observe a
/// partial object.
///
/// References are `{public_base}/{key}`; with an empty base the reference is
/// the key itself.
pub struct FileSystemStorage {
    root: PathBuf,
    public_base: String,
}

impl FileSystemStorage {
    /// Create a new filesystem backend rooted at `root`.
    ///
    /// Creates the root directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(root, public_base))]
    pub fn new(
        root: impl Into<PathBuf>,
        public_base: impl Into<String>,
    ) -> TankobonResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), "Opened filesystem storage");
        Ok(Self {
            root,
            public_base: public_base.into(),
        })
    }

    fn reference(&self, key: &str) -> ImageRef {
        if self.public_base.is_empty() {
            ImageRef::new(key)
        } else {
            ImageRef::new(format!("{}/{}", self.public_base, key))
        }
    }

    /// Resolve a key to a path, rejecting keys that escape the root.
    fn path_for(&self, key: &str) -> TankobonResult<PathBuf> {
        if key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|segment| segment.is_empty() || segment == "..")
        {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(key.to_string())).into());
        }
        Ok(self.root.join(key))
    }

    /// Key for a file path relative to the root.
    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }
}

#[async_trait::async_trait]
impl ObjectStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, key: &str, bytes: &[u8]) -> TankobonResult<ImageRef> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Temp file + rename so a crash never leaves a partial object. The
        // suffix is appended to the full name so keys differing only in
        // extension never share a temp path
        let mut temp_name = path.clone().into_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Upload(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Upload(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(size = bytes.len(), "Stored object");
        Ok(self.reference(key))
    }

    #[tracing::instrument(skip(self, keys), fields(count = keys.len()))]
    async fn delete(&self, keys: &[String]) -> TankobonResult<()> {
        let mut failures = Vec::new();

        for key in keys {
            let path = self.path_for(key)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                // Already absent is a no-op
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => failures.push(format!("{key}: {e}")),
            }
        }

        if failures.is_empty() {
            tracing::debug!(count = keys.len(), "Deleted objects");
            Ok(())
        } else {
            Err(StorageError::new(StorageErrorKind::Delete(failures.join("; "))).into())
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, prefix: &str) -> TankobonResult<Vec<String>> {
        let base = self.path_for(prefix)?;
        if !tokio::fs::try_exists(&base).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        let mut pending = vec![base];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
                StorageError::new(StorageErrorKind::List(format!("{}: {}", dir.display(), e)))
            })?;

            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                StorageError::new(StorageErrorKind::List(format!("{}: {}", dir.display(), e)))
            })? {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(|e| {
                    StorageError::new(StorageErrorKind::List(format!("{}: {}", path.display(), e)))
                })?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(key) = self.key_for(&path) {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
