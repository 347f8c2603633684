//! Identity types resolved from the external auth provider.

use serde::{Deserialize, Serialize};

use crate::ProfileId;

/// The application's view of a signed-in user.
///
/// The session itself (tokens, expiry, refresh) is owned entirely by the
/// auth provider; this is the narrow `{ id, email }` projection the
/// application actually consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: ProfileId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens returned by an authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthenticatedUser,
}
