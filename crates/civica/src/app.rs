//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that manages storage lifecycle,
//! configuration, and the collaborator services, and resolves the
//! per-request authorization context commands run under.

use crate::auth::{Identity, RequestContext, StaticAuthProvider};
use crate::commands::init::{
    find_civica_root, CivicaConfig, CIVICA_DIR_NAME, CONFIG_FILE_NAME, MEDIA_DIR_NAME,
};
use crate::error::{Error, Result};
use crate::services::{LocalMediaStore, OfflineGeocoder};
use crate::storage::{create_store, IssueStore, StorageBackend};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Manages storage initialization and lifecycle, and wires the auth
/// provider, blob store, and geocoder the commands use. Storage is loaded
/// from the civica directory on creation.
pub struct App {
    /// The storage backend (trait object for polymorphism).
    store: Box<dyn IssueStore>,

    /// Path to the civica directory (`.civica`).
    civica_dir: PathBuf,

    /// Loaded configuration.
    config: CivicaConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("civica_dir", &self.civica_dir)
            .field("config", &self.config)
            .field("store", &"<dyn IssueStore>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree to find a `.civica/` directory, loads
    /// configuration, and initializes storage.
    ///
    /// # Errors
    ///
    /// Returns an error if no civica repository is found in the directory
    /// tree, configuration cannot be loaded, or storage initialization
    /// fails.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_civica_root(working_dir).ok_or_else(|| {
            Error::Config(format!(
                "Not a civica repository (no '{CIVICA_DIR_NAME}' directory found)"
            ))
        })?;

        let civica_dir = root_dir.join(CIVICA_DIR_NAME);
        let config_path = civica_dir.join(CONFIG_FILE_NAME);

        let config = CivicaConfig::load(&config_path).await?;

        let data_path = root_dir.join(&config.storage.data_file);
        let store = create_store(
            StorageBackend::Jsonl(data_path),
            &config.tracking_prefix,
        )
        .await?;

        Ok(Self {
            store,
            civica_dir,
            config,
        })
    }

    /// Get a mutable reference to the storage.
    pub fn store_mut(&mut self) -> &mut dyn IssueStore {
        self.store.as_mut()
    }

    /// Get an immutable reference to the storage.
    pub fn store(&self) -> &dyn IssueStore {
        self.store.as_ref()
    }

    /// The loaded configuration.
    pub fn config(&self) -> &CivicaConfig {
        &self.config
    }

    /// The path to the civica directory.
    pub fn civica_dir(&self) -> &Path {
        &self.civica_dir
    }

    /// The path to the configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.civica_dir.join(CONFIG_FILE_NAME)
    }

    /// The auth provider backed by this repository's role bindings.
    #[must_use]
    pub fn auth_provider(&self) -> StaticAuthProvider {
        StaticAuthProvider::new(self.config.admins.clone())
    }

    /// The blob store writing into this repository's media directory.
    #[must_use]
    pub fn media_store(&self) -> LocalMediaStore {
        LocalMediaStore::new(self.civica_dir.join(MEDIA_DIR_NAME))
    }

    /// The geocoder for address derivation.
    #[must_use]
    pub fn geocoder(&self) -> OfflineGeocoder {
        OfflineGeocoder
    }

    /// Resolve a per-request context for the named acting identity.
    ///
    /// `None` yields an anonymous context.
    pub async fn context_for(&self, email: Option<&str>) -> Result<RequestContext> {
        let provider = self.auth_provider();
        let identity = email.map(Identity::from_email);
        RequestContext::resolve(&provider, identity).await
    }

    /// Save storage state to persistent storage.
    ///
    /// This should be called after any mutating operation.
    pub async fn save(&self) -> Result<()> {
        self.store.save().await
    }
}
