//! Storage configuration.

use crate::FileSystemStorage;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tankobon_error::{ConfigError, TankobonResult};

/// Configuration for the filesystem storage backend.
///
/// Loaded from the `[storage]` table of `tankobon.toml`, with `TANKOBON_*`
/// environment variables taking precedence (e.g. `TANKOBON_STORAGE__ROOT`).
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding all stored objects
    pub root: PathBuf,
    /// Base prepended to keys when building public references
    #[serde(default)]
    pub public_base: String,
}

impl StorageConfig {
    /// Load configuration from `tankobon.toml` in the working directory and
    /// the environment.
    pub fn load() -> TankobonResult<Self> {
        Self::load_from(Path::new("tankobon.toml"))
    }

    /// Load configuration from the given TOML file and the environment.
    pub fn load_from(path: &Path) -> TankobonResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("TANKOBON")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))?;

        settings
            .get::<Self>("storage")
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// Open the filesystem backend this configuration describes.
    pub fn open(&self) -> TankobonResult<FileSystemStorage> {
        FileSystemStorage::new(&self.root, self.public_base.clone())
    }
}
