use crate::cache::CacheStore;
use crate::ports::AuthTokenProvider;
use serde_json::Value;
use shared::Result;
use std::sync::Arc;
use tracing::info;

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";

/// Signed-in user state persisted through the cache.
///
/// The token is read back from the cache on every request, so a session
/// restored from disk authenticates without further setup.
#[derive(Clone, Debug)]
pub struct UserSession {
    cache: Arc<CacheStore>,
}

impl UserSession {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self { cache }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.cache.set(TOKEN_KEY, token, None)
    }

    pub fn set_user_info(&self, user_info: &Value) -> Result<()> {
        self.cache.set(USER_INFO_KEY, user_info, None)
    }

    pub fn current_token(&self) -> Option<String> {
        Some(self.cache.get(TOKEN_KEY, String::new())).filter(|t| !t.is_empty())
    }

    /// Stored profile, an empty object when signed out.
    pub fn user_info(&self) -> Value {
        self.cache.get(USER_INFO_KEY, Value::Object(Default::default()))
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_token().is_some()
    }

    /// Forget the token and profile.
    pub fn logout(&self) -> Result<()> {
        self.cache.remove(TOKEN_KEY)?;
        self.cache.remove(USER_INFO_KEY)?;
        info!("User session cleared");
        Ok(())
    }
}

impl AuthTokenProvider for UserSession {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.current_token())
    }
}
