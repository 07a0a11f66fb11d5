//! Foundation types for libris.
//!
//! This crate provides the domain vocabulary used throughout the libris
//! system. Every other libris crate depends on `libris-types`.
//!
//! # Key Types
//!
//! - [`Book`] — A catalogued book record (the unit of persistence)
//! - [`BookId`] — Content-derived identifier (BLAKE3 hash of the record)
//! - [`Username`] — Validated account name, safe as a filesystem path segment
//! - [`SearchField`] — Which record field a search matches against
//! - [`RequestScope`] — Owner vs. shared (read-only) access, resolved per request

pub mod book;
pub mod error;
pub mod scope;
pub mod username;

pub use book::{Book, BookId, SearchField};
pub use error::TypeError;
pub use scope::RequestScope;
pub use username::Username;
