use crate::error::{BlendError, Result};
use async_trait::async_trait;
use gcp_auth::TokenProvider as _;
use std::fmt;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Short-lived bearer token. Never cached by this crate.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn acquire_token(&self) -> Result<AccessToken>;
}

/// Resolves Application Default Credentials on every call: a service account
/// key from `GOOGLE_APPLICATION_CREDENTIALS`, the local gcloud session, or the
/// metadata server.
#[derive(Debug, Clone)]
pub struct AdcCredentialProvider {
    scopes: Vec<String>,
}

impl Default for AdcCredentialProvider {
    fn default() -> Self {
        Self {
            scopes: vec![CLOUD_PLATFORM_SCOPE.to_string()],
        }
    }
}

impl AdcCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialProvider for AdcCredentialProvider {
    async fn acquire_token(&self) -> Result<AccessToken> {
        let provider = gcp_auth::provider().await.map_err(|e| {
            log::error!("❌ Authentication failed. Could not find default credentials: {}", e);
            log::error!("➡️  Run 'gcloud auth application-default login' for local development,");
            log::error!("   or set GOOGLE_APPLICATION_CREDENTIALS for production.");
            BlendError::AuthError("Could not get auth token.".into())
        })?;

        let scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
        let token = provider.token(&scopes).await.map_err(|e| {
            log::error!("❌ Token exchange with the identity provider failed: {}", e);
            BlendError::AuthError("Could not get auth token.".into())
        })?;

        log::debug!("Acquired access token for {}", CLOUD_PLATFORM_SCOPE);
        Ok(AccessToken::new(token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken::new("ya29.secret");
        assert_eq!(format!("{:?}", token), "AccessToken(****)");
        assert_eq!(token.bearer_header(), "Bearer ya29.secret");
    }

    #[test]
    fn test_default_scope() {
        let provider = AdcCredentialProvider::new();
        assert_eq!(provider.scopes, vec![CLOUD_PLATFORM_SCOPE.to_string()]);
    }
}
