use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Get the global configuration instance
///
/// Falls back to in-memory defaults when `init_config` has not run, so
/// library users embedding the router never hit an uninitialised global.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (if it exists) and `TINYAPP__*`
/// environment variables. Only the first call has an effect.
///
/// # Examples
/// ```no_run
/// use tinyapp::config::{get_config, init_config};
/// init_config("config.toml");
/// let config = get_config();
/// ```
pub fn init_config(path: &str) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load(path)));
}
