use libris_types::BookId;
use thiserror::Error;

/// Errors from library operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Registration for a name that already has a credential record.
    #[error("username already exists: {0}")]
    UserExists(String),

    /// Login for a name with no credential record.
    #[error("user does not exist: {0}")]
    UserNotFound(String),

    /// Login with a password whose digest does not match.
    #[error("invalid password")]
    InvalidPassword,

    /// Registration where the two password fields differ.
    #[error("passwords don't match")]
    PasswordMismatch,

    /// A mutating operation attempted from a shared (read-only) scope.
    #[error("operation requires an authenticated owner scope")]
    ReadOnlyScope,

    /// No record with the given id in the scoped catalog.
    #[error("book not found: {0}")]
    BookNotFound(BookId),

    /// The record has no attached PDF.
    #[error("book has no attached PDF")]
    NoPdf,

    /// An upload whose file name is not a `.pdf`.
    #[error("only PDF uploads are accepted: {0}")]
    PdfOnly(String),

    /// Domain type validation failure.
    #[error(transparent)]
    Type(#[from] libris_types::TypeError),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] libris_store::StoreError),
}

/// Result alias for library operations.
pub type OpsResult<T> = Result<T, OpsError>;
