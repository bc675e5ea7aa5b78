//! User Directory
//!
//! Process-wide user store. Users are keyed by id with a secondary index on
//! email, both behind one lock so that the email uniqueness check and the
//! insert happen atomically.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::errors::{Result, TinyAppError};
use crate::storage::models::{Credential, User};
use crate::utils::password::hash_password;
use crate::utils::{MAX_DRAW_ATTEMPTS, generate_random_code};

/// How new credentials are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// argon2id hash
    Hashed,
    /// raw string, legacy behaviour
    Plain,
}

impl CredentialPolicy {
    pub fn from_hash_flag(hash_passwords: bool) -> Self {
        if hash_passwords {
            CredentialPolicy::Hashed
        } else {
            CredentialPolicy::Plain
        }
    }

    /// Turn a raw credential into what gets stored.
    pub fn seal(&self, raw: &str) -> Result<Credential> {
        match self {
            CredentialPolicy::Hashed => Ok(Credential::Hashed(hash_password(raw)?)),
            CredentialPolicy::Plain => Ok(Credential::Plain(raw.to_string())),
        }
    }
}

/// 未知邮箱时用来比对的凭据，让两种登录失败花费相同的时间
const DECOY_CREDENTIAL: &str = "tinyapp-decoy-credential";

#[derive(Default)]
struct UserIndex {
    by_id: HashMap<String, User>,
    by_email: HashMap<String, String>,
}

pub struct UserDirectory {
    inner: RwLock<UserIndex>,
    policy: CredentialPolicy,
    id_length: usize,
    decoy: Credential,
}

impl UserDirectory {
    pub fn new(policy: CredentialPolicy, id_length: usize) -> Self {
        let decoy = policy.seal(DECOY_CREDENTIAL).unwrap_or_else(|e| {
            warn!("UserDirectory: failed to prepare decoy credential: {}", e);
            Credential::Plain(DECOY_CREDENTIAL.to_string())
        });

        Self {
            inner: RwLock::new(UserIndex::default()),
            policy,
            id_length: id_length.max(1),
            decoy,
        }
    }

    pub fn policy(&self) -> CredentialPolicy {
        self.policy
    }

    /// Exact, case-sensitive lookup by email.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read();
        inner
            .by_email
            .get(email)
            .and_then(|id| inner.by_id.get(id))
            .cloned()
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        self.inner.read().by_id.get(id).cloned()
    }

    /// Register a new user under a freshly drawn id.
    ///
    /// The credential is sealed before the write lock is taken; a duplicate
    /// email is rejected with `EmailTaken` and nothing is stored.
    pub fn create(&self, email: &str, raw_credential: &str) -> Result<User> {
        let credential = self.policy.seal(raw_credential)?;

        let mut inner = self.inner.write();
        if inner.by_email.contains_key(email) {
            debug!("UserDirectory: rejected duplicate email '{}'", email);
            return Err(TinyAppError::email_taken(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let id = (0..MAX_DRAW_ATTEMPTS)
            .map(|_| generate_random_code(self.id_length))
            .find(|id| !inner.by_id.contains_key(id))
            .ok_or_else(|| {
                warn!(
                    "UserDirectory: no free {}-char id after {} draws",
                    self.id_length, MAX_DRAW_ATTEMPTS
                );
                TinyAppError::storage(format!(
                    "No free user id after {} attempts",
                    MAX_DRAW_ATTEMPTS
                ))
            })?;

        let user = User {
            id: id.clone(),
            email: email.to_string(),
            credential,
            created_at: Utc::now(),
        };
        inner.by_email.insert(user.email.clone(), id.clone());
        inner.by_id.insert(id, user.clone());

        info!("UserDirectory: created user '{}'", user.id);
        Ok(user)
    }

    /// Insert a fully-formed user (seed data). Both id and email must be new.
    pub fn insert(&self, user: User) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.by_id.contains_key(&user.id) {
            return Err(TinyAppError::validation(format!(
                "User id '{}' already exists",
                user.id
            )));
        }
        if inner.by_email.contains_key(&user.email) {
            return Err(TinyAppError::email_taken(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }

        inner.by_email.insert(user.email.clone(), user.id.clone());
        inner.by_id.insert(user.id.clone(), user);
        Ok(())
    }

    /// Check a login attempt.
    ///
    /// Returns `None` for an unknown email and for a wrong credential alike.
    /// An unknown email is still checked against a decoy credential sealed
    /// with the same policy, so both failures cost one comparison. A stored
    /// hash that fails to parse is logged and also rejected.
    pub fn verify(&self, email: &str, raw_credential: &str) -> Option<User> {
        let Some(user) = self.find_by_email(email) else {
            let _ = self.decoy.matches(raw_credential);
            return None;
        };

        match user.credential.matches(raw_credential) {
            Ok(true) => Some(user),
            Ok(false) => None,
            Err(e) => {
                error!("UserDirectory: credential check failed for '{}': {}", user.id, e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn plain_directory() -> UserDirectory {
        UserDirectory::new(CredentialPolicy::Plain, 8)
    }

    fn seed_user(id: &str, email: &str, password: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            credential: Credential::Plain(password.to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_find_by_email_exact_match() {
        let users = plain_directory();
        users
            .insert(seed_user("userRandomID", "user@example.com", "purple-monkey-dinosaur"))
            .unwrap();
        users
            .insert(seed_user("user2RandomID", "user2@example.com", "dishwasher-funk"))
            .unwrap();

        let found = users.find_by_email("user@example.com").expect("seed user");
        assert_eq!(found.id, "userRandomID");

        assert!(users.find_by_email("nobody@x.com").is_none());
        assert!(users.find_by_email("USER@example.com").is_none());
    }

    #[test]
    fn test_create_assigns_id_of_configured_length() {
        let users = plain_directory();
        let user = users.create("a@b.com", "pw").unwrap();

        assert_eq!(user.id.len(), 8);
        assert_eq!(users.find_by_id(&user.id), Some(user.clone()));
        assert_eq!(users.find_by_email("a@b.com"), Some(user));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_create_rejects_duplicate_email() {
        let users = plain_directory();
        users.create("a@b.com", "pw").unwrap();

        let err = users.create("a@b.com", "other").unwrap_err();
        assert!(matches!(err, TinyAppError::EmailTaken(_)));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let users = plain_directory();
        users.insert(seed_user("u1", "a@b.com", "pw")).unwrap();
        assert!(users.insert(seed_user("u1", "c@d.com", "pw")).is_err());
        assert!(users.find_by_email("c@d.com").is_none());
    }

    #[test]
    fn test_verify_outcomes_are_indistinguishable() {
        let users = plain_directory();
        users
            .insert(seed_user("userRandomID", "user@example.com", "purple-monkey-dinosaur"))
            .unwrap();

        let wrong_password = users.verify("user@example.com", "nope");
        let unknown_email = users.verify("ghost@example.com", "purple-monkey-dinosaur");
        assert_eq!(wrong_password, unknown_email);
        assert!(wrong_password.is_none());

        let ok = users.verify("user@example.com", "purple-monkey-dinosaur");
        assert_eq!(ok.map(|u| u.id), Some("userRandomID".to_string()));
    }

    #[test]
    fn test_hashed_policy_never_stores_raw_credential() {
        let users = UserDirectory::new(CredentialPolicy::Hashed, 8);
        let user = users.create("a@b.com", "pw").unwrap();

        assert!(user.credential.is_hashed());
        assert_ne!(user.credential, Credential::Hashed("pw".to_string()));
        assert!(users.verify("a@b.com", "pw").is_some());
        assert!(users.verify("a@b.com", "PW").is_none());
    }

    #[test]
    fn test_unknown_email_checks_decoy_of_same_policy() {
        let hashed = UserDirectory::new(CredentialPolicy::Hashed, 8);
        assert!(hashed.decoy.is_hashed());
        assert!(hashed.verify("ghost@example.com", DECOY_CREDENTIAL).is_none());

        let plain = plain_directory();
        assert!(!plain.decoy.is_hashed());
        assert!(plain.verify("ghost@example.com", DECOY_CREDENTIAL).is_none());
    }

    #[test]
    fn test_concurrent_registration_same_email() {
        let users = Arc::new(plain_directory());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let users = Arc::clone(&users);
                thread::spawn(move || users.create("race@example.com", &format!("pw{}", i)))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, TinyAppError::EmailTaken(_)))
        );
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_concurrent_registration_distinct_emails() {
        let users = Arc::new(plain_directory());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let users = Arc::clone(&users);
                thread::spawn(move || users.create(&format!("u{}@example.com", i), "pw").unwrap().id)
            })
            .collect();

        let ids: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids.len(), 32);
        assert_eq!(users.len(), 32);
    }

    #[test]
    fn test_full_id_space_fails_instead_of_spinning() {
        let users = UserDirectory::new(CredentialPolicy::Plain, 1);
        for (i, c) in "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"
            .chars()
            .enumerate()
        {
            users
                .insert(seed_user(&c.to_string(), &format!("u{}@example.com", i), "pw"))
                .unwrap();
        }

        let err = users.create("late@example.com", "pw").unwrap_err();
        assert!(matches!(err, TinyAppError::Storage(_)));
        assert!(users.find_by_email("late@example.com").is_none());
        assert_eq!(users.len(), 62);
    }

    #[test]
    fn test_malformed_hash_is_rejected_not_fatal() {
        let users = plain_directory();
        users
            .insert(User {
                credential: Credential::Hashed("garbage".to_string()),
                ..seed_user("u1", "a@b.com", "")
            })
            .unwrap();

        assert!(users.verify("a@b.com", "garbage").is_none());
    }
}
