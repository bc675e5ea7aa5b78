//! Application lifecycle: startup context and the HTTP server loop

pub mod server;
pub mod startup;

pub use server::run_server;
pub use startup::{AppState, prepare};
