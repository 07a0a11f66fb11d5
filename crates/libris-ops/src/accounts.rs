//! Account registration and login.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::info;

use libris_store::{CatalogStore, Credential, CredentialStore};
use libris_types::Username;

use crate::error::{OpsError, OpsResult};

/// The stored digest of a password: unsalted single-round SHA-256,
/// lowercase hex. The on-disk credential format pins this exact digest,
/// so leaked credential files are cheap to brute-force offline.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Account operations over a credential store and a catalog store.
pub struct Accounts {
    credentials: Arc<dyn CredentialStore>,
    catalogs: Arc<dyn CatalogStore>,
}

impl Accounts {
    pub fn new(credentials: Arc<dyn CredentialStore>, catalogs: Arc<dyn CatalogStore>) -> Self {
        Self {
            credentials,
            catalogs,
        }
    }

    /// Register a new account and initialize its empty catalog.
    ///
    /// Fails with [`OpsError::PasswordMismatch`] if the confirmation
    /// differs, and with [`OpsError::UserExists`] if a credential record
    /// already exists; in both cases nothing is touched.
    pub fn register(&self, username: &Username, password: &str, confirm: &str) -> OpsResult<()> {
        if password != confirm {
            return Err(OpsError::PasswordMismatch);
        }
        if self.credentials.exists(username)? {
            return Err(OpsError::UserExists(username.to_string()));
        }

        let credential = Credential::new(password_digest(password));
        self.credentials.write(username, &credential)?;
        self.catalogs.save(username, &[])?;
        info!(user = %username, "account registered");
        Ok(())
    }

    /// Verify a login attempt. Never mutates the store.
    ///
    /// Fails with [`OpsError::UserNotFound`] if the name was never
    /// registered, and with [`OpsError::InvalidPassword`] on a digest
    /// mismatch. There is no lockout or throttling on failed attempts.
    pub fn login(&self, username: &Username, password: &str) -> OpsResult<()> {
        let credential = self
            .credentials
            .read(username)?
            .ok_or_else(|| OpsError::UserNotFound(username.to_string()))?;

        if !credential.matches(&password_digest(password)) {
            return Err(OpsError::InvalidPassword);
        }
        info!(user = %username, "login succeeded");
        Ok(())
    }
}
