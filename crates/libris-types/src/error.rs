use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid username {name:?}: {reason}")]
    InvalidUsername { name: String, reason: String },

    #[error("unknown search field: {0} (expected title, author, genre, or year)")]
    UnknownSearchField(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),
}
