//! In-process session registry.
//!
//! A session is created at login and addressed by a random bearer
//! token. Session state is process-local and keyed strictly by token:
//! each session's view of "its username" comes only from its own login,
//! never from state shared across sessions. Alongside the username, a
//! session carries the per-book reader toggles (which book's reader the
//! UI currently has open), keyed by stable [`BookId`].

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use rand::RngCore;

use libris_types::{BookId, Username};

/// State carried by one authenticated session.
#[derive(Clone, Debug)]
pub struct Session {
    pub username: Username,
    /// Books whose reader view is currently toggled open.
    pub open_readers: HashSet<BookId>,
}

/// Registry of live sessions, keyed by bearer token.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a user and return its bearer token.
    ///
    /// A user logging in from two clients gets two independent sessions;
    /// there is no session-per-user dedup.
    pub fn create(&self, username: Username) -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.insert(
            token.clone(),
            Session {
                username,
                open_readers: HashSet::new(),
            },
        );
        token
    }

    /// The user bound to a token, if the session is live.
    pub fn username_for(&self, token: &str) -> Option<Username> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.get(token).map(|s| s.username.clone())
    }

    /// Drop a session. Returns whether one existed (logout is
    /// idempotent either way).
    pub fn remove(&self, token: &str) -> bool {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.remove(token).is_some()
    }

    /// Flip the reader toggle for a book in this session. Returns the
    /// new state, or `None` if the token matches no session.
    pub fn toggle_reader(&self, token: &str, id: BookId) -> Option<bool> {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let session = sessions.get_mut(token)?;
        if session.open_readers.remove(&id) {
            Some(false)
        } else {
            session.open_readers.insert(id);
            Some(true)
        }
    }

    /// The set of books this session has toggled open.
    pub fn open_readers(&self, token: &str) -> HashSet<BookId> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(token)
            .map(|s| s.open_readers.clone())
            .unwrap_or_default()
    }
}
