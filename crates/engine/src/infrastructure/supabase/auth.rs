//! GoTrue auth client (Supabase identity API).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use caprate_domain::{AuthSession, AuthenticatedUser, ProfileId};

use crate::infrastructure::ports::{AuthError, AuthPort};
use crate::infrastructure::supabase::REQUEST_TIMEOUT_SECS;

/// Client for the project's `/auth/v1` endpoints.
#[derive(Clone)]
pub struct GoTrueClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl GoTrueClient {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }
}

#[async_trait]
impl AuthPort for GoTrueClient {
    async fn current_user(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthenticatedUser>, AuthError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        // An expired or bogus token is "no user", not a failure.
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| AuthError::RequestFailed(e.to_string()))?;
            return Err(AuthError::RequestFailed(error_text));
        }

        let user: GoTrueUser = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        Ok(Some(user.into()))
    }

    async fn exchange_code(&self, code: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "authorization_code")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "auth_code": code }))
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| AuthError::RequestFailed(e.to_string()))?;
            return Err(AuthError::ExchangeRejected(error_text));
        }

        let session: GoTrueSession = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        Ok(session.into())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        // A token that is already dead counts as signed out.
        if response.status() == StatusCode::UNAUTHORIZED || response.status().is_success() {
            return Ok(());
        }

        let error_text = response
            .text()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;
        Err(AuthError::RequestFailed(error_text))
    }

    fn sign_in_url(&self, provider: &str, redirect_to: &str) -> String {
        let base = format!("{}/auth/v1/authorize", self.base_url);
        match reqwest::Url::parse_with_params(
            &base,
            &[("provider", provider), ("redirect_to", redirect_to)],
        ) {
            Ok(url) => url.into(),
            Err(_) => base,
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<GoTrueUser> for AuthenticatedUser {
    fn from(user: GoTrueUser) -> Self {
        Self {
            id: ProfileId::new(user.id),
            // GoTrue reports a missing email as the empty string.
            email: user.email.filter(|e| !e.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    user: GoTrueUser,
}

impl From<GoTrueSession> for AuthSession {
    fn from(session: GoTrueSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user: session.user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_url_encodes_the_redirect_target() {
        let client = GoTrueClient::new("https://proj.supabase.co/", "anon");
        let url = client.sign_in_url("github", "http://localhost:3000/auth/callback");
        assert!(url.starts_with("https://proj.supabase.co/auth/v1/authorize?"));
        assert!(url.contains("provider=github"));
        assert!(url.contains("redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"));
    }

    #[test]
    fn empty_email_maps_to_none() {
        let user: GoTrueUser =
            serde_json::from_str(r#"{"id":"u1","email":""}"#).expect("deserialize");
        let resolved: AuthenticatedUser = user.into();
        assert!(resolved.email.is_none());
        assert_eq!(resolved.id, ProfileId::new("u1"));
    }

    #[test]
    fn session_parses_token_exchange_response() {
        let json = r#"{
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": {"id": "u1", "email": "a@b.c"}
        }"#;
        let session: GoTrueSession = serde_json::from_str(json).expect("deserialize");
        let session: AuthSession = session.into();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.user.email.as_deref(), Some("a@b.c"));
    }
}
