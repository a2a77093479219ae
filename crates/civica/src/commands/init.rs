//! Implementation of the `init` command and repository configuration.
//!
//! This module handles initialization of a new civica repository, creating
//! the `.civica/` directory structure with configuration, data file, and
//! media directory. It also owns the configuration schema, including the
//! admin role bindings consulted by the lifecycle engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default tracking-id prefix if none specified.
pub const DEFAULT_PREFIX: &str = "CIV";

/// Name of the civica directory.
pub const CIVICA_DIR_NAME: &str = ".civica";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the issues data file.
pub const ISSUES_FILE_NAME: &str = "issues.jsonl";

/// Name of the media directory.
pub const MEDIA_DIR_NAME: &str = "media";

/// Name of the gitignore file within `.civica`.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Minimum prefix length.
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Maximum prefix length.
pub const MAX_PREFIX_LENGTH: usize = 10;

/// Maximum directory depth to traverse when searching for the civica root.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for civica.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CivicaConfig {
    /// Tracking-id prefix (e.g., "CIV" for "CIV-A3F8K2").
    #[serde(rename = "tracking-prefix")]
    pub tracking_prefix: String,

    /// Storage configuration.
    pub storage: StorageConfig,

    /// Emails holding the `admin` role.
    ///
    /// Bindings are written here by `grant-admin`; the engine only reads
    /// them.
    #[serde(default)]
    pub admins: Vec<String>,
}

/// Storage configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("memory" for in-memory with JSONL persistence).
    pub backend: String,

    /// Path to the data file, relative to the repository root.
    pub data_file: String,
}

impl CivicaConfig {
    /// Create a new configuration with the given prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            tracking_prefix: prefix.to_string(),
            storage: StorageConfig {
                backend: "memory".to_string(),
                data_file: format!("{CIVICA_DIR_NAME}/{ISSUES_FILE_NAME}"),
            },
            admins: Vec::new(),
        }
    }

    /// Load configuration from a file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Grant the `admin` role to an email.
    ///
    /// Idempotent: granting to an existing admin is a no-op. Returns `true`
    /// if the binding was newly created.
    pub fn grant_admin(&mut self, email: &str) -> bool {
        if self.admins.iter().any(|admin| admin == email) {
            return false;
        }
        self.admins.push(email.to_string());
        true
    }
}

impl Default for CivicaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Result of the init command.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created civica directory.
    pub civica_dir: PathBuf,
    /// Path to the created config file.
    pub config_file: PathBuf,
    /// Path to the created issues file.
    pub issues_file: PathBuf,
    /// Path to the created media directory.
    pub media_dir: PathBuf,
    /// The prefix used for tracking ids.
    pub prefix: String,
}

/// Validate a tracking-id prefix.
///
/// Requirements:
/// - 2-10 characters
/// - ASCII alphanumeric only
///
/// Note: expects pre-trimmed input; the prefix is uppercased by `init`.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.len() < MIN_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix must be at least {MIN_PREFIX_LENGTH} characters"
        )));
    }

    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix cannot exceed {MAX_PREFIX_LENGTH} characters"
        )));
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Config(
            "Prefix must contain only alphanumeric characters".to_string(),
        ));
    }

    Ok(())
}

/// Initialize a new civica repository in the given directory.
///
/// # Errors
///
/// Returns an error if the `.civica/` directory already exists, the prefix
/// is invalid, or file system operations fail.
pub async fn init(base_dir: &Path, prefix: Option<&str>) -> Result<InitResult> {
    let prefix = prefix.unwrap_or(DEFAULT_PREFIX).trim();
    validate_prefix(prefix)?;
    let prefix = prefix.to_ascii_uppercase();

    let civica_dir = base_dir.join(CIVICA_DIR_NAME);

    if civica_dir.exists() {
        return Err(Error::Config(format!(
            "Civica is already initialized in this directory. Found existing '{CIVICA_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&civica_dir).await?;

    let config_file = civica_dir.join(CONFIG_FILE_NAME);
    let config = CivicaConfig::new(&prefix);
    config.save(&config_file).await?;

    let issues_file = civica_dir.join(ISSUES_FILE_NAME);
    fs::write(&issues_file, "").await?;

    let media_dir = civica_dir.join(MEDIA_DIR_NAME);
    fs::create_dir_all(&media_dir).await?;

    let gitignore_file = civica_dir.join(GITIGNORE_FILE_NAME);
    let gitignore_content = "\
# Media blobs are environment-local; the issues.jsonl file should be tracked
media/
";
    fs::write(&gitignore_file, gitignore_content).await?;

    Ok(InitResult {
        civica_dir,
        config_file,
        issues_file,
        media_dir,
        prefix,
    })
}

/// Find the civica repository root by walking up from the given directory.
///
/// Returns the directory containing `.civica/`, or `None` if the traversal
/// reaches the filesystem root (or the depth cap) without finding one.
#[must_use]
pub fn find_civica_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;

    for _ in 0..MAX_TRAVERSAL_DEPTH {
        if current.join(CIVICA_DIR_NAME).is_dir() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn init_creates_the_repository_layout() {
        let temp = TempDir::new().unwrap();

        let result = init(temp.path(), Some("city")).await.unwrap();

        assert_eq!(result.prefix, "CITY");
        assert!(result.config_file.exists());
        assert!(result.issues_file.exists());
        assert!(result.media_dir.is_dir());

        let config = CivicaConfig::load(&result.config_file).await.unwrap();
        assert_eq!(config.tracking_prefix, "CITY");
        assert!(config.admins.is_empty());
    }

    #[tokio::test]
    async fn init_twice_fails() {
        let temp = TempDir::new().unwrap();

        init(temp.path(), None).await.unwrap();
        assert!(init(temp.path(), None).await.is_err());
    }

    #[tokio::test]
    async fn config_round_trips_through_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        let mut config = CivicaConfig::new("CIV");
        config.grant_admin("clerk@city.gov");
        config.save(&path).await.unwrap();

        let loaded = CivicaConfig::load(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn grant_admin_is_idempotent() {
        let mut config = CivicaConfig::default();

        assert!(config.grant_admin("clerk@city.gov"));
        assert!(!config.grant_admin("clerk@city.gov"));
        assert_eq!(config.admins.len(), 1);
    }

    #[test]
    fn prefix_validation_rejects_bad_shapes() {
        assert!(validate_prefix("C").is_err());
        assert!(validate_prefix("ABCDEFGHIJK").is_err());
        assert!(validate_prefix("CI-V").is_err());
        assert!(validate_prefix("CIV").is_ok());
    }

    #[tokio::test]
    async fn find_root_walks_up_from_subdirectories() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), None).await.unwrap();

        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let root = find_civica_root(&nested).unwrap();
        assert_eq!(root, temp.path());
    }
}
