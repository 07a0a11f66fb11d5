//! In-memory backend for testing and ephemeral use.
//!
//! [`MemLibrary`] keeps all data in `HashMap`s behind `RwLock`s. It
//! implements the full set of store traits and is suitable for unit
//! tests of the operations layer. Data is lost when the store is
//! dropped.

use std::collections::HashMap;
use std::sync::RwLock;

use libris_types::{Book, Username};

use crate::credential::Credential;
use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, CatalogStore, CredentialStore};

/// An in-memory implementation of the library stores.
#[derive(Debug, Default)]
pub struct MemLibrary {
    credentials: RwLock<HashMap<String, Credential>>,
    catalogs: RwLock<HashMap<String, Vec<Book>>>,
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemLibrary {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(e: impl std::fmt::Display) -> Result<T, StoreError> {
    Err(StoreError::Lock(e.to_string()))
}

impl CredentialStore for MemLibrary {
    fn exists(&self, username: &Username) -> StoreResult<bool> {
        match self.credentials.read() {
            Ok(map) => Ok(map.contains_key(username.as_str())),
            Err(e) => poisoned(e),
        }
    }

    fn read(&self, username: &Username) -> StoreResult<Option<Credential>> {
        match self.credentials.read() {
            Ok(map) => Ok(map.get(username.as_str()).cloned()),
            Err(e) => poisoned(e),
        }
    }

    fn write(&self, username: &Username, credential: &Credential) -> StoreResult<()> {
        match self.credentials.write() {
            Ok(mut map) => {
                map.insert(username.as_str().to_string(), credential.clone());
                Ok(())
            }
            Err(e) => poisoned(e),
        }
    }
}

impl CatalogStore for MemLibrary {
    fn load(&self, username: &Username) -> StoreResult<Vec<Book>> {
        match self.catalogs.read() {
            Ok(map) => Ok(map.get(username.as_str()).cloned().unwrap_or_default()),
            Err(e) => poisoned(e),
        }
    }

    fn save(&self, username: &Username, catalog: &[Book]) -> StoreResult<()> {
        match self.catalogs.write() {
            Ok(mut map) => {
                map.insert(username.as_str().to_string(), catalog.to_vec());
                Ok(())
            }
            Err(e) => poisoned(e),
        }
    }
}

impl BlobStore for MemLibrary {
    fn store(&self, username: &Username, file_name: &str, bytes: &[u8]) -> StoreResult<String> {
        let name = std::path::Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidPath(file_name.to_string()))?;
        let path = format!("{}/pdfs/{}", username.as_str(), name);
        match self.blobs.write() {
            Ok(mut map) => {
                map.insert(path.clone(), bytes.to_vec());
                Ok(path)
            }
            Err(e) => poisoned(e),
        }
    }

    fn retrieve(&self, path: &str) -> StoreResult<Vec<u8>> {
        match self.blobs.read() {
            Ok(map) => map
                .get(path)
                .cloned()
                .ok_or_else(|| StoreError::FileNotFound(path.to_string())),
            Err(e) => poisoned(e),
        }
    }
}
