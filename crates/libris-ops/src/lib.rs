//! Operations layer for libris.
//!
//! Composes the credential, catalog, and blob stores into the
//! user-facing operations: account registration and login, adding and
//! removing books, searching, PDF retrieval, and share-link
//! construction.
//!
//! Access control lives here, not in the stores: every mutating
//! operation takes a [`RequestScope`] and refuses to write unless the
//! scope owns the target catalog. Shared (read-only) scopes can reach
//! only loads and searches.
//!
//! [`RequestScope`]: libris_types::RequestScope

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod share;

pub use accounts::{password_digest, Accounts};
pub use catalog::{search, Library, NewBook, PdfUpload};
pub use error::{OpsError, OpsResult};
pub use share::share_url;
