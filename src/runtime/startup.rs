use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::api::{SessionCookies, SessionTokenService};
use crate::config::StaticConfig;
use crate::errors::Result;
use crate::services::{AccessGate, AuthService, UrlService};
use crate::storage::seed::seed_directories;
use crate::storage::{CredentialPolicy, UrlDirectory, UserDirectory};

/// Everything a request handler needs, shared across workers through
/// `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub urls: Arc<UrlService>,
    pub sessions: Arc<SessionTokenService>,
    pub cookies: SessionCookies,
    pub gate: AccessGate,
}

impl AppState {
    /// 根据配置构建目录与会话服务，按需写入演示数据
    pub fn from_config(config: &StaticConfig) -> Result<Self> {
        config.features.validate()?;

        let policy = CredentialPolicy::from_hash_flag(config.auth.hash_passwords);
        if policy == CredentialPolicy::Plain {
            warn!("auth.hash_passwords = false: credentials are stored as entered");
        }

        let users = Arc::new(UserDirectory::new(policy, config.features.user_id_length));
        let urls = Arc::new(UrlDirectory::new(config.features.random_code_length));

        if config.features.seed_demo_data {
            seed_directories(&users, &urls)?;
        }

        Ok(Self {
            auth: Arc::new(AuthService::new(users)),
            urls: Arc::new(UrlService::new(urls)),
            sessions: Arc::new(SessionTokenService::from_config(&config.session)),
            cookies: SessionCookies::from_config(&config.session),
            gate: AccessGate::default(),
        })
    }
}

/// 准备服务器启动的上下文
pub fn prepare(config: &StaticConfig) -> Result<AppState> {
    let start_time = Instant::now();
    debug!("Starting pre-startup processing...");

    let state = AppState::from_config(config)?;

    info!(
        "Pre-startup completed in {} ms ({} users, {} short URLs)",
        start_time.elapsed().as_millis(),
        state.auth.users().len(),
        state.urls.directory().len()
    );

    Ok(state)
}
