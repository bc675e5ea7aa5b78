use serde::{Deserialize, Serialize};

use crate::utils::password::{PasswordError, plaintext_matches, verify_password};

/// Stored secret for a user.
///
/// `Plain` is the legacy mode (`auth.hash_passwords = false`), kept so the
/// old behaviour can still be reproduced.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Credential {
    Hashed(String),
    Plain(String),
}

impl Credential {
    /// Compare a raw credential against the stored one.
    pub fn matches(&self, raw: &str) -> Result<bool, PasswordError> {
        match self {
            Credential::Hashed(hash) => verify_password(raw, hash),
            Credential::Plain(stored) => Ok(plaintext_matches(raw, stored)),
        }
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, Credential::Hashed(_))
    }
}

// never print the secret, hashed or not
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Hashed(_) => f.write_str("Credential::Hashed(..)"),
            Credential::Plain(_) => f.write_str("Credential::Plain(..)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub credential: Credential,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntry {
    pub short_code: String,
    pub target_url: String,
    /// `None` for global entries that predate ownership.
    pub owner_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UrlEntry {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id.as_deref() == Some(user_id)
    }
}
