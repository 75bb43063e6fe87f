//! In-memory storage implementation.
//!
//! Used by tests and local development. Records every put and delete call so
//! tests can assert on the exact operation sets the engine issued.

use crate::ObjectStorage;
use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock};
use tankobon_core::ImageRef;
use tankobon_error::{StorageError, StorageErrorKind, TankobonResult};

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorage {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
    puts: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_put_matching: Mutex<Option<String>>,
    public_base: String,
}

impl MemoryStorage {
    /// Create an empty backend whose references equal their keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend with a public base prefixed onto references.
    pub fn with_public_base(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into(),
            ..Self::default()
        }
    }

    fn reference(&self, key: &str) -> ImageRef {
        if self.public_base.is_empty() {
            ImageRef::new(key)
        } else {
            ImageRef::new(format!("{}/{}", self.public_base, key))
        }
    }

    /// Seed an object directly, bypassing call recording.
    pub fn seed(&self, key: impl Into<String>, bytes: Vec<u8>) -> ImageRef {
        let key = key.into();
        let reference = self.reference(&key);
        self.objects
            .write()
            .expect("storage lock poisoned")
            .insert(key, bytes);
        reference
    }

    /// Whether an object exists under the key.
    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .read()
            .expect("storage lock poisoned")
            .contains_key(key)
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.read().expect("storage lock poisoned").len()
    }

    /// Every key passed to [`ObjectStorage::put`], in call order.
    pub fn recorded_puts(&self) -> Vec<String> {
        self.puts.lock().expect("storage lock poisoned").clone()
    }

    /// Every key passed to [`ObjectStorage::delete`], in call order.
    pub fn recorded_deletes(&self) -> Vec<String> {
        self.deletes.lock().expect("storage lock poisoned").clone()
    }

    /// Make subsequent puts fail when the key contains the given fragment.
    pub fn fail_put_containing(&self, fragment: impl Into<String>) {
        *self.fail_put_matching.lock().expect("storage lock poisoned") = Some(fragment.into());
    }
}

#[async_trait::async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> TankobonResult<ImageRef> {
        if let Some(fragment) = self
            .fail_put_matching
            .lock()
            .expect("storage lock poisoned")
            .as_deref()
            && key.contains(fragment)
        {
            return Err(StorageError::new(StorageErrorKind::Upload(format!(
                "injected failure for {key}"
            )))
            .into());
        }

        self.puts
            .lock()
            .expect("storage lock poisoned")
            .push(key.to_string());
        self.objects
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_string(), bytes.to_vec());
        Ok(self.reference(key))
    }

    async fn delete(&self, keys: &[String]) -> TankobonResult<()> {
        let mut objects = self.objects.write().expect("storage lock poisoned");
        let mut deletes = self.deletes.lock().expect("storage lock poisoned");
        for key in keys {
            // Absent keys are a no-op
            objects.remove(key);
            deletes.push(key.clone());
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> TankobonResult<Vec<String>> {
        let objects = self.objects.read().expect("storage lock poisoned");
        let dir = format!("{prefix}/");
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(&dir))
            .cloned()
            .collect())
    }
}
