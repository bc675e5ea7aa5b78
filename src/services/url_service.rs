//! URL management service
//!
//! Every single-entry operation goes through the same lookup: missing code
//! → `NotFound`, entry not owned by the caller → `AccessDenied`.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{Result, TinyAppError};
use crate::services::access_gate::{Identity, LOGIN_REQUIRED_MESSAGE, authorize};
use crate::services::ownership::filter_by_owner;
use crate::storage::{UrlDirectory, UrlEntry};

pub struct UrlService {
    urls: Arc<UrlDirectory>,
}

impl UrlService {
    pub fn new(urls: Arc<UrlDirectory>) -> Self {
        Self { urls }
    }

    pub fn directory(&self) -> &Arc<UrlDirectory> {
        &self.urls
    }

    /// `short_code -> target_url` for everything the identity owns.
    pub fn list_for(&self, identity: &Identity) -> BTreeMap<String, String> {
        let snapshot = self.urls.snapshot();
        filter_by_owner(&snapshot, identity.user_id())
    }

    pub fn create_for(&self, identity: &Identity, target_url: &str) -> Result<UrlEntry> {
        let Some(owner_id) = identity.user_id() else {
            return Err(TinyAppError::access_denied(LOGIN_REQUIRED_MESSAGE));
        };

        self.urls.create(target_url, Some(owner_id))
    }

    /// Fetch an entry the identity is allowed to see.
    pub fn get_owned(&self, identity: &Identity, short_code: &str) -> Result<UrlEntry> {
        let entry = self.urls.get(short_code).ok_or_else(|| {
            TinyAppError::not_found(format!("Short URL '{}' does not exist", short_code))
        })?;

        if let Err(reason) = authorize(&entry, identity) {
            warn!(
                "UrlService: denied access to '{}' ({:?}) for {:?}",
                short_code,
                reason,
                identity.user_id()
            );
            return Err(TinyAppError::access_denied(LOGIN_REQUIRED_MESSAGE));
        }

        Ok(entry)
    }

    pub fn update_owned(
        &self,
        identity: &Identity,
        short_code: &str,
        new_target_url: &str,
    ) -> Result<UrlEntry> {
        self.get_owned(identity, short_code)?;
        self.urls.update(short_code, new_target_url)
    }

    /// Delete an owned entry. A code that is already gone is not an error.
    pub fn delete_owned(&self, identity: &Identity, short_code: &str) -> Result<Option<UrlEntry>> {
        match self.get_owned(identity, short_code) {
            Ok(_) => Ok(self.urls.delete(short_code)),
            Err(TinyAppError::NotFound(_)) => {
                info!("UrlService: delete of missing '{}' ignored", short_code);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Public redirect target, no ownership involved.
    pub fn resolve_target(&self, short_code: &str) -> Result<String> {
        self.urls
            .get(short_code)
            .map(|entry| entry.target_url)
            .ok_or_else(|| {
                TinyAppError::not_found(format!("Short URL '{}' does not exist", short_code))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Credential, User};
    use chrono::Utc;

    fn identity(id: &str) -> Identity {
        Identity::Authenticated(User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            credential: Credential::Plain("pw".to_string()),
            created_at: Utc::now(),
        })
    }

    fn service() -> UrlService {
        UrlService::new(Arc::new(UrlDirectory::new(6)))
    }

    #[test]
    fn test_create_and_list_for_owner() {
        let urls = service();
        let alice = identity("alice");
        let bob = identity("bob");

        let entry = urls.create_for(&alice, "http://x.com").unwrap();
        urls.create_for(&bob, "http://y.com").unwrap();

        let listing = urls.list_for(&alice);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.get(&entry.short_code).map(String::as_str), Some("http://x.com"));
        assert!(urls.list_for(&Identity::Anonymous).is_empty());
    }

    #[test]
    fn test_anonymous_cannot_create() {
        let urls = service();
        let err = urls.create_for(&Identity::Anonymous, "http://x.com").unwrap_err();
        assert!(matches!(err, TinyAppError::AccessDenied(_)));
        assert!(urls.directory().is_empty());
    }

    #[test]
    fn test_get_owned_distinguishes_missing_from_foreign() {
        let urls = service();
        let entry = urls.create_for(&identity("alice"), "http://x.com").unwrap();

        assert!(urls.get_owned(&identity("alice"), &entry.short_code).is_ok());
        assert!(matches!(
            urls.get_owned(&identity("bob"), &entry.short_code),
            Err(TinyAppError::AccessDenied(_))
        ));
        assert!(matches!(
            urls.get_owned(&identity("alice"), "zzzzzz"),
            Err(TinyAppError::NotFound(_))
        ));
    }

    #[test]
    fn test_foreign_update_and_delete_leave_entry_alone() {
        let urls = service();
        let entry = urls.create_for(&identity("alice"), "http://x.com").unwrap();
        let bob = identity("bob");

        assert!(urls.update_owned(&bob, &entry.short_code, "http://evil.com").is_err());
        assert!(urls.delete_owned(&bob, &entry.short_code).is_err());

        let stored = urls.directory().get(&entry.short_code).unwrap();
        assert_eq!(stored.target_url, "http://x.com");
    }

    #[test]
    fn test_owner_update_and_repeated_delete() {
        let urls = service();
        let alice = identity("alice");
        let entry = urls.create_for(&alice, "http://x.com").unwrap();

        let updated = urls.update_owned(&alice, &entry.short_code, "http://z.com").unwrap();
        assert_eq!(updated.target_url, "http://z.com");

        assert!(urls.delete_owned(&alice, &entry.short_code).unwrap().is_some());
        assert!(urls.delete_owned(&alice, &entry.short_code).unwrap().is_none());
    }

    #[test]
    fn test_resolve_target() {
        let urls = service();
        let entry = urls.create_for(&identity("alice"), "http://x.com").unwrap();

        assert_eq!(urls.resolve_target(&entry.short_code).unwrap(), "http://x.com");
        assert!(matches!(
            urls.resolve_target("zzzzzz"),
            Err(TinyAppError::NotFound(_))
        ));
    }
}
