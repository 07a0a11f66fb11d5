//! Request access scope.
//!
//! Every request resolves to exactly one scope before any catalog
//! operation runs, and the scope is threaded explicitly through the
//! operations layer. There is no ambient "current user" state.

use crate::username::Username;

/// The access scope of a single request.
///
/// Owner mode is the authenticated path: reads and writes target the
/// session's own user. Shared mode is the read-only path selected by the
/// `shared` query flag: the target user comes verbatim from the request
/// and authentication is ignored entirely. Anyone naming a user can read
/// that user's catalog in shared mode; that is the sharing mechanism,
/// and mutating operations are refused in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestScope {
    /// Authenticated access to the session user's own library.
    Owner { username: Username },
    /// Unauthenticated read-only view of `target`'s library.
    Shared { target: Username },
}

impl RequestScope {
    /// Owner scope for the given user.
    pub fn owner(username: Username) -> Self {
        Self::Owner { username }
    }

    /// Shared scope for the given target, defaulting to `guest`.
    pub fn shared(target: Option<Username>) -> Self {
        Self::Shared {
            target: target.unwrap_or_else(Username::guest),
        }
    }

    /// The user whose catalog this request reads.
    pub fn target(&self) -> &Username {
        match self {
            Self::Owner { username } => username,
            Self::Shared { target } => target,
        }
    }

    /// The user this request may write as, if any.
    ///
    /// Shared scopes can never write; every mutating operation gates on
    /// this returning `Some`.
    pub fn writer(&self) -> Option<&Username> {
        match self {
            Self::Owner { username } => Some(username),
            Self::Shared { .. } => None,
        }
    }

    /// Whether this is the shared (read-only) view.
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared { .. })
    }
}
