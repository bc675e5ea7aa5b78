//! Session tokens and the cookie that carries them.
//!
//! The cookie holds an HS256 JWT whose `sub` is the user id. Nothing is kept
//! server-side; the token is re-validated and the user re-resolved on every
//! request.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{SameSitePolicy, SessionConfig};
use crate::utils::generate_secure_token;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Issues and validates session tokens
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    max_age_hours: u64,
}

impl SessionTokenService {
    pub fn new(secret: &str, max_age_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            max_age_hours,
        }
    }

    /// Create from the `[session]` config section
    pub fn from_config(config: &SessionConfig) -> Self {
        // 未配置密钥时生成随机值，重启后所有会话失效
        let secret = if config.secret.is_empty() {
            warn!("Session secret not configured, generating a random one; sessions will not survive a restart");
            generate_secure_token(32)
        } else {
            config.secret.clone()
        };

        Self::new(&secret, config.max_age_hours)
    }

    pub fn issue(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.max_age_hours as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
    }
}

/// Cookie 构建器
#[derive(Debug, Clone)]
pub struct SessionCookies {
    name: String,
    same_site: SameSite,
    secure: bool,
    max_age_hours: u64,
}

impl SessionCookies {
    pub fn from_config(config: &SessionConfig) -> Self {
        let same_site = match config.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            name: config.cookie_name.clone(),
            same_site,
            secure: config.secure,
            max_age_hours: config.max_age_hours,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.name.clone(), token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(self.same_site);
        cookie.set_secure(self.secure);
        cookie.set_max_age(CookieDuration::hours(self.max_age_hours as i64));
        cookie
    }

    /// Expired, empty cookie that makes the browser drop the session
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.name.clone(), "");
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.make_removal();
        cookie
    }
}
