//! Business logic
//!
//! - `ownership`: what an identity may see
//! - `access_gate`: whether an identity may reach a path or touch an entry
//! - `auth_service` / `url_service`: operations used by the HTTP handlers

pub mod access_gate;
pub mod auth_service;
pub mod ownership;
pub mod url_service;

pub use access_gate::{
    AccessDenied, AccessGate, GateDecision, Identity, LOGIN_REQUIRED_MESSAGE, authorize,
};
pub use auth_service::AuthService;
pub use ownership::filter_by_owner;
pub use url_service::UrlService;
