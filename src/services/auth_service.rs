//! Registration and login on top of the User Directory.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{Result, TinyAppError};
use crate::storage::{User, UserDirectory};

pub const REGISTER_EMPTY_MESSAGE: &str = "Oops! Please enter an email and password to register!";
pub const EMAIL_TAKEN_MESSAGE: &str = "That email is already taken, try again!";
/// Same text for unknown email and wrong password.
pub const LOGIN_FAILED_MESSAGE: &str = "Your email or password was incorrect, please try again!";

pub struct AuthService {
    users: Arc<UserDirectory>,
}

impl AuthService {
    pub fn new(users: Arc<UserDirectory>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &Arc<UserDirectory> {
        &self.users
    }

    /// Create an account. Empty email or password is a validation error, an
    /// already registered email is `EmailTaken`.
    pub fn register(&self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            return Err(TinyAppError::validation(REGISTER_EMPTY_MESSAGE));
        }

        let user = self.users.create(email, password).map_err(|e| match e {
            TinyAppError::EmailTaken(_) => TinyAppError::email_taken(EMAIL_TAKEN_MESSAGE),
            other => other,
        })?;

        info!("AuthService: registered '{}'", user.id);
        Ok(user)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        match self.users.verify(email, password) {
            Some(user) => {
                info!("AuthService: login succeeded for '{}'", user.id);
                Ok(user)
            }
            None => {
                warn!("AuthService: login rejected");
                Err(TinyAppError::invalid_credentials(LOGIN_FAILED_MESSAGE))
            }
        }
    }

    /// Look up the user a session token points at.
    pub fn resolve(&self, user_id: &str) -> Option<User> {
        self.users.find_by_id(user_id)
    }
}
