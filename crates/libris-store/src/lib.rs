//! Storage layer for libris.
//!
//! This crate persists per-user library data under a single data root:
//!
//! ```text
//! <root>/<username>/credentials.json    { "password": "<hex digest>" }
//! <root>/<username>/library.json        [ {title, author, year, genre, pdf_path|null}, ... ]
//! <root>/<username>/pdfs/<filename>.pdf
//! ```
//!
//! # Storage Backends
//!
//! All backends implement the three store traits:
//!
//! - [`FsLibrary`] — the filesystem backend, creating per-user
//!   directories on demand
//! - [`MemLibrary`] — `HashMap`-based backend for unit tests and embedding
//!
//! # Design Rules
//!
//! 1. The stores never enforce access control; callers gate every
//!    mutating call on scope ownership before it reaches a store.
//! 2. Catalog saves are whole-file rewrites with no locking and no
//!    atomic rename: concurrent writers to one user lose updates (last
//!    writer wins), and a crash mid-write can corrupt the file.
//! 3. A missing catalog file is a valid empty catalog, not an error.
//! 4. Blob writes overwrite same-named files silently; blobs are never
//!    deleted by any store operation.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod credential;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use credential::Credential;
pub use error::{StoreError, StoreResult};
pub use fs::FsLibrary;
pub use memory::MemLibrary;
pub use traits::{BlobStore, CatalogStore, CredentialStore};
