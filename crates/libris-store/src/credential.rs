use serde::{Deserialize, Serialize};

/// The stored credential record for one user.
///
/// Serialized verbatim as `{"password": "<hex digest>"}`. The digest is
/// an unsalted SHA-256 of the password, computed by the operations
/// layer; the store treats it as opaque. Created at registration and
/// never rotated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Lowercase hex digest of the password.
    pub password: String,
}

impl Credential {
    pub fn new(digest: impl Into<String>) -> Self {
        Self {
            password: digest.into(),
        }
    }

    /// Compare against a freshly computed digest.
    pub fn matches(&self, digest: &str) -> bool {
        self.password == digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_shape_is_pinned() {
        let cred = Credential::new("abc123");
        assert_eq!(
            serde_json::to_string(&cred).unwrap(),
            r#"{"password":"abc123"}"#
        );
    }

    #[test]
    fn digest_comparison() {
        let cred = Credential::new("abc123");
        assert!(cred.matches("abc123"));
        assert!(!cred.matches("abc124"));
    }
}
