use std::fmt;

use anyhow::Result;
use http::HeaderValue;

/// Personal access token sent as a bearer credential.
#[derive(Clone)]
pub struct GithubToken {
    secret: String,
}

impl GithubToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn authorization_header(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.secret.trim()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for GithubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubToken")
            .field("secret", &"<redacted>")
            .finish()
    }
}
