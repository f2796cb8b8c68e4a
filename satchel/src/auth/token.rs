use crate::ports::AuthTokenProvider;
use shared::Result;

/// Token provider with a fixed value, `None` for anonymous clients.
#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl AuthTokenProvider for StaticToken {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.0.clone().filter(|t| !t.is_empty()))
    }
}
