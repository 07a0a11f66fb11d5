//! Account name validation.
//!
//! Usernames are used directly as filesystem path segments under the data
//! root, so construction rejects anything that could escape or mangle a
//! directory name:
//! - Must be non-empty and at most 64 bytes
//! - ASCII alphanumerics plus `-`, `_`, `.` only
//! - Must not be `.` or `..`, and must not start with `.`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Maximum username length in bytes.
pub const MAX_USERNAME_LEN: usize = 64;

/// A validated account name.
///
/// Comparison is case-sensitive: `Alice` and `alice` are distinct users
/// with distinct data directories.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and wrap a name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        let invalid = |reason: &str| TypeError::InvalidUsername {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if name.len() > MAX_USERNAME_LEN {
            return Err(invalid("longer than 64 bytes"));
        }
        if name == "." || name == ".." {
            return Err(invalid("reserved path segment"));
        }
        if name.starts_with('.') {
            return Err(invalid("must not start with '.'"));
        }
        if let Some(ch) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(invalid(&format!("contains forbidden character {ch:?}")));
        }

        Ok(Self(name))
    }

    /// The default identity for a shared link with no `user` parameter.
    pub fn guest() -> Self {
        Self("guest".to_string())
    }

    /// The validated name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({})", self.0)
    }
}

impl FromStr for Username {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Username {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}
