//! In-memory storage
//!
//! Two process-lifetime directories. Nothing is persisted; a restart brings
//! back only the seed data.

pub mod models;
pub mod seed;
pub mod url_directory;
pub mod user_directory;

pub use models::{Credential, UrlEntry, User};
pub use url_directory::UrlDirectory;
pub use user_directory::{CredentialPolicy, UserDirectory};
