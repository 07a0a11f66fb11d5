//! Filesystem backend.
//!
//! Lays out one directory per user under the data root and creates
//! directories on demand. All reads and writes are synchronous and
//! inline with the calling request.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use libris_types::{Book, Username};

use crate::credential::Credential;
use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, CatalogStore, CredentialStore};

const CREDENTIALS_FILE: &str = "credentials.json";
const CATALOG_FILE: &str = "library.json";
const PDF_DIR: &str = "pdfs";

/// Filesystem-backed library storage rooted at a data directory.
#[derive(Clone, Debug)]
pub struct FsLibrary {
    root: PathBuf,
}

impl FsLibrary {
    /// Open (or designate) a data root. The directory itself is created
    /// lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, username: &Username) -> PathBuf {
        self.root.join(username.as_str())
    }

    fn credentials_path(&self, username: &Username) -> PathBuf {
        self.user_dir(username).join(CREDENTIALS_FILE)
    }

    fn catalog_path(&self, username: &Username) -> PathBuf {
        self.user_dir(username).join(CATALOG_FILE)
    }

    fn pdf_dir(&self, username: &Username) -> PathBuf {
        self.user_dir(username).join(PDF_DIR)
    }

    /// Reject stored paths that are absolute or step outside the root.
    fn checked_blob_path(&self, path: &str) -> StoreResult<PathBuf> {
        let rel = Path::new(path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if rel.is_absolute() || escapes {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

impl CredentialStore for FsLibrary {
    fn exists(&self, username: &Username) -> StoreResult<bool> {
        Ok(self.credentials_path(username).exists())
    }

    fn read(&self, username: &Username) -> StoreResult<Option<Credential>> {
        let path = self.credentials_path(username);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let credential = serde_json::from_str(&data)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(credential))
    }

    fn write(&self, username: &Username, credential: &Credential) -> StoreResult<()> {
        fs::create_dir_all(self.user_dir(username))?;
        let data = serde_json::to_string(credential)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(self.credentials_path(username), data)?;
        debug!(user = %username, "credential record written");
        Ok(())
    }
}

impl CatalogStore for FsLibrary {
    fn load(&self, username: &Username) -> StoreResult<Vec<Book>> {
        let path = self.catalog_path(username);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn save(&self, username: &Username, catalog: &[Book]) -> StoreResult<()> {
        fs::create_dir_all(self.user_dir(username))?;
        // Pretty-printed. Plain rewrite in place: no lock, no
        // temp-file rename.
        let data = serde_json::to_string_pretty(catalog)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(self.catalog_path(username), data)?;
        debug!(user = %username, records = catalog.len(), "catalog rewritten");
        Ok(())
    }
}

impl BlobStore for FsLibrary {
    fn store(&self, username: &Username, file_name: &str, bytes: &[u8]) -> StoreResult<String> {
        // Keep only the final component of whatever name the client sent.
        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidPath(file_name.to_string()))?;

        let dir = self.pdf_dir(username);
        fs::create_dir_all(&dir)?;
        let dest = dir.join(name);
        let replaced = dest.exists();
        fs::write(&dest, bytes)?;
        debug!(user = %username, file = name, replaced, "blob stored");

        Ok(format!("{}/{}/{}", username.as_str(), PDF_DIR, name))
    }

    fn retrieve(&self, path: &str) -> StoreResult<Vec<u8>> {
        let full = self.checked_blob_path(path)?;
        if !full.exists() {
            return Err(StoreError::FileNotFound(path.to_string()));
        }
        Ok(fs::read(full)?)
    }
}
