//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - The identity provider (could swap GoTrue -> another OAuth broker)
//! - The data store (could swap PostgREST -> direct SQL)
//! - Clock/Random (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use caprate_domain::{
    AuthSession, AuthenticatedUser, Caption, CaptionId, ProfileId, Vote, VoteValue,
};

// =============================================================================
// Error Types
// =============================================================================

/// The raw failure reported by the backing store.
///
/// The store is an opaque external dependency; its error surface is not
/// independently modeled, so the message text travels verbatim for
/// classification and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreFailure {
    pub message: String,
    pub code: Option<String>,
    pub details: Option<String>,
}

impl StoreFailure {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Store rejected operation: {0}")]
    Rejected(StoreFailure),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Auth request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Code exchange rejected: {0}")]
    ExchangeRejected(String),
}

// =============================================================================
// Infrastructure Types
// =============================================================================

/// A vote row about to be inserted. The store generates the row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub caption_id: CaptionId,
    pub profile_id: ProfileId,
    pub value: VoteValue,
    pub created_datetime_utc: DateTime<Utc>,
    pub modified_datetime_utc: DateTime<Utc>,
}

// =============================================================================
// Identity Provider Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Resolve the user behind an access token. `Ok(None)` means the
    /// token does not map to a signed-in user.
    async fn current_user(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthenticatedUser>, AuthError>;

    /// Convert an OAuth authorization code into a session.
    async fn exchange_code(&self, code: &str) -> Result<AuthSession, AuthError>;

    /// Revoke the session upstream.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Build the provider authorize URL the login page links to.
    fn sign_in_url(&self, provider: &str, redirect_to: &str) -> String;
}

// =============================================================================
// Data Store Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionRepo: Send + Sync {
    /// Fetch every caption row. The token, when present, is forwarded so
    /// row policies apply to the caller rather than the anonymous role.
    async fn list_all(&self, access_token: Option<String>) -> Result<Vec<Caption>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepo: Send + Sync {
    /// Insert a vote and return the written row.
    ///
    /// The store enforces the one-vote-per-(profile, caption) constraint
    /// and its row-level write policy; violations surface as
    /// [`RepoError::Rejected`] with the store's own message text.
    async fn insert(&self, vote: NewVote, access_token: &str) -> Result<Vote, RepoError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform draw from `[0, upper)`. `upper` must be non-zero.
    fn gen_index(&self, upper: usize) -> usize;
}
