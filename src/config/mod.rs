//! Configuration management
//!
//! Static configuration is read once at startup from an optional TOML file
//! and `TINYAPP__*` environment variables.

mod r#impl;
mod structs;

pub use r#impl::{DEFAULT_CONFIG_PATH, get_config, init_config};
pub use structs::*;
