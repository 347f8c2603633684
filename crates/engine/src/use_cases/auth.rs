//! Auth orchestration use cases - thin wrappers over the identity
//! provider port, one per user story.

use std::sync::Arc;

use caprate_domain::{AuthSession, AuthenticatedUser};

use crate::infrastructure::ports::{AuthError, AuthPort};

/// Resolve the caller behind an access token.
pub struct CurrentUser {
    auth: Arc<dyn AuthPort>,
}

impl CurrentUser {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self { auth }
    }

    /// `None` for a missing or unresolvable token. Provider errors are
    /// logged and collapse to `None`: from the caller's point of view
    /// there is simply no signed-in user.
    pub async fn execute(&self, access_token: Option<&str>) -> Option<AuthenticatedUser> {
        let token = access_token?;
        match self.auth.current_user(token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(error = %e, "identity lookup failed");
                None
            }
        }
    }
}

/// Convert an OAuth callback code into a session.
pub struct ExchangeCode {
    auth: Arc<dyn AuthPort>,
}

impl ExchangeCode {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self { auth }
    }

    pub async fn execute(&self, code: &str) -> Result<AuthSession, AuthError> {
        let session = self.auth.exchange_code(code).await?;
        tracing::info!(profile_id = %session.user.id, "code exchange succeeded");
        Ok(session)
    }
}

/// Revoke the caller's session upstream.
pub struct SignOut {
    auth: Arc<dyn AuthPort>,
}

impl SignOut {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self { auth }
    }

    /// Best effort: a failed upstream revocation is logged, the local
    /// cookies get cleared either way.
    pub async fn execute(&self, access_token: &str) {
        if let Err(e) = self.auth.sign_out(access_token).await {
            tracing::warn!(error = %e, "upstream sign-out failed");
        }
    }
}

/// Build the provider authorize URL the login page links to.
pub struct SignInUrl {
    auth: Arc<dyn AuthPort>,
}

impl SignInUrl {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self { auth }
    }

    pub fn execute(&self, provider: &str, redirect_to: &str) -> String {
        self.auth.sign_in_url(provider, redirect_to)
    }
}

#[cfg(test)]
mod tests {
    use caprate_domain::ProfileId;

    use crate::infrastructure::ports::MockAuthPort;

    use super::*;

    #[tokio::test]
    async fn provider_error_collapses_to_no_user() {
        let mut auth = MockAuthPort::new();
        auth.expect_current_user()
            .returning(|_| Err(AuthError::RequestFailed("down".to_string())));

        let use_case = CurrentUser::new(Arc::new(auth));
        assert!(use_case.execute(Some("token")).await.is_none());
    }

    #[tokio::test]
    async fn missing_token_never_reaches_the_provider() {
        let use_case = CurrentUser::new(Arc::new(MockAuthPort::new()));
        assert!(use_case.execute(None).await.is_none());
    }

    #[tokio::test]
    async fn resolved_user_is_returned() {
        let mut auth = MockAuthPort::new();
        auth.expect_current_user().returning(|_| {
            Ok(Some(AuthenticatedUser {
                id: ProfileId::new("p1"),
                email: None,
            }))
        });

        let use_case = CurrentUser::new(Arc::new(auth));
        let user = use_case.execute(Some("token")).await.expect("signed in");
        assert_eq!(user.id, ProfileId::new("p1"));
    }
}
