//! Access Gate
//!
//! Two per-request decisions:
//! - may this identity reach this path at all (`AccessGate::check`)
//! - may this identity view or change this entry (`authorize`)
//!
//! Both failures end up as the same "please log in" response; a caller that
//! does not own an entry is not told so separately.

use crate::storage::{UrlEntry, User};

/// Shown on the login view whenever the gate turns a request away.
pub const LOGIN_REQUIRED_MESSAGE: &str =
    "Please login or register to Tiny App to access this page!";

/// Resolved identity of the current request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(user),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|u| u.id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RequireLogin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    Anonymous,
    NotOwner,
}

/// Path policy for anonymous visitors.
#[derive(Debug, Clone)]
pub struct AccessGate {
    public_paths: Vec<String>,
    public_prefixes: Vec<String>,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self {
            public_paths: vec!["/login".to_string(), "/register".to_string()],
            public_prefixes: vec!["/u/".to_string()],
        }
    }
}

impl AccessGate {
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
            || self.public_prefixes.iter().any(|p| path.starts_with(p))
    }

    pub fn check(&self, identity: &Identity, path: &str) -> GateDecision {
        if identity.is_authenticated() || self.is_public(path) {
            GateDecision::Allow
        } else {
            GateDecision::RequireLogin
        }
    }
}

/// Ownership check for a single entry.
pub fn authorize(entry: &UrlEntry, identity: &Identity) -> Result<(), AccessDenied> {
    match identity.user_id() {
        None => Err(AccessDenied::Anonymous),
        Some(user_id) if entry.is_owned_by(user_id) => Ok(()),
        Some(_) => Err(AccessDenied::NotOwner),
    }
}
