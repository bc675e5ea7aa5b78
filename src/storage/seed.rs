//! Demo data loaded at startup when `features.seed_demo_data` is on.

use chrono::Utc;
use tracing::debug;

use crate::errors::Result;
use crate::storage::models::{UrlEntry, User};
use crate::storage::{UrlDirectory, UserDirectory};

/// (id, email, password)
pub const SEED_USERS: [(&str, &str, &str); 2] = [
    ("userRandomID", "user@example.com", "purple-monkey-dinosaur"),
    ("user2RandomID", "user2@example.com", "dishwasher-funk"),
];

/// (short code, target, owner id)
pub const SEED_URLS: [(&str, &str, &str); 2] = [
    ("b2xVn2", "http://www.lighthouselabs.ca", "userRandomID"),
    ("9sm5xK", "http://www.google.com", "user2RandomID"),
];

/// Load the demo users and entries. Credentials go through the directory's
/// own policy, so seeded users are hashed exactly like registered ones.
pub fn seed_directories(users: &UserDirectory, urls: &UrlDirectory) -> Result<()> {
    for (id, email, password) in SEED_USERS {
        users.insert(User {
            id: id.to_string(),
            email: email.to_string(),
            credential: users.policy().seal(password)?,
            created_at: Utc::now(),
        })?;
    }

    for (code, target, owner) in SEED_URLS {
        urls.insert(UrlEntry {
            short_code: code.to_string(),
            target_url: target.to_string(),
            owner_id: Some(owner.to_string()),
            created_at: Utc::now(),
        })?;
    }

    debug!(
        "Seeded {} users and {} short URLs",
        SEED_USERS.len(),
        SEED_URLS.len()
    );
    Ok(())
}
