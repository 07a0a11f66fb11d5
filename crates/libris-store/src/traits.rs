use libris_types::{Book, Username};

use crate::credential::Credential;
use crate::error::StoreResult;

/// Per-user credential records.
///
/// One record per user, written once at registration. The store holds
/// opaque digests; password hashing and verification live in the
/// operations layer.
pub trait CredentialStore: Send + Sync {
    /// Whether a credential record exists for the user.
    fn exists(&self, username: &Username) -> StoreResult<bool>;

    /// Read the user's credential record.
    ///
    /// Returns `Ok(None)` if the user was never registered.
    fn read(&self, username: &Username) -> StoreResult<Option<Credential>>;

    /// Write the user's credential record, creating the user's data
    /// directory if needed.
    fn write(&self, username: &Username, credential: &Credential) -> StoreResult<()>;
}

/// Per-user book catalogs.
///
/// The catalog is an ordered list of records persisted as one JSON file.
/// Every mutation is a whole-file rewrite: load, change in memory, save.
/// The store does not enforce ownership; callers must gate mutating
/// calls on "acting user == target user" before reaching the store.
pub trait CatalogStore: Send + Sync {
    /// Load the user's full catalog.
    ///
    /// A missing catalog file (or missing user directory) is a valid
    /// empty catalog (e.g. immediately after registration, or for an
    /// unknown shared target) and returns `Ok(vec![])`.
    fn load(&self, username: &Username) -> StoreResult<Vec<Book>>;

    /// Rewrite the user's catalog wholesale.
    ///
    /// Not atomic and not isolated: concurrent saves for one user lose
    /// updates (last writer wins).
    fn save(&self, username: &Username, catalog: &[Book]) -> StoreResult<()>;
}

/// Per-user PDF blob storage.
pub trait BlobStore: Send + Sync {
    /// Store uploaded bytes under the user's blob directory.
    ///
    /// `file_name` is reduced to its final path component before use.
    /// A same-named existing file is overwritten silently; uploads are
    /// not versioned. Returns the root-relative path for embedding in a
    /// book record.
    fn store(&self, username: &Username, file_name: &str, bytes: &[u8]) -> StoreResult<String>;

    /// Read back a blob by its stored path.
    ///
    /// Fails with [`StoreError::FileNotFound`] if the path no longer
    /// resolves; catalog records are never checked against blob contents
    /// at load time, so this is where a stale `pdf_path` surfaces.
    ///
    /// [`StoreError::FileNotFound`]: crate::error::StoreError::FileNotFound
    fn retrieve(&self, path: &str) -> StoreResult<Vec<u8>>;
}
