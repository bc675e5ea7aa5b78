//! HTTP layer: session handling, middleware, views, handlers and routes

pub mod middleware;
pub mod routes;
pub mod services;
pub mod session;
pub mod views;

pub use routes::configure_routes;
pub use session::{SessionClaims, SessionCookies, SessionTokenService};
