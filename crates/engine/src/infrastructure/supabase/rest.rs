//! PostgREST data client (Supabase table API).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use caprate_domain::{Caption, Vote};

use crate::infrastructure::ports::{CaptionRepo, NewVote, RepoError, StoreFailure, VoteRepo};
use crate::infrastructure::supabase::REQUEST_TIMEOUT_SECS;

/// Columns requested back from a vote insert. Mirrors the vote row type.
const VOTE_COLUMNS: &str =
    "id,created_datetime_utc,modified_datetime_utc,caption_id,profile_id,vote_value";

/// Client for the project's `/rest/v1` table endpoints.
#[derive(Clone)]
pub struct PostgrestClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl PostgrestClient {
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

    /// Turn a non-2xx PostgREST response into a [`RepoError::Rejected`]
    /// carrying whatever the store said, verbatim.
    async fn rejection(response: reqwest::Response) -> RepoError {
        let status = response.status();
        match response.text().await {
            Ok(body) => RepoError::Rejected(parse_error_body(&body)),
            Err(e) => RepoError::Transport(format!("{status}: {e}")),
        }
    }
}

/// Extract `{message, code, details}` from a PostgREST error body,
/// falling back to the raw text when it is not the expected JSON.
fn parse_error_body(body: &str) -> StoreFailure {
    match serde_json::from_str::<PostgrestErrorBody>(body) {
        Ok(parsed) => StoreFailure {
            message: parsed.message.unwrap_or_else(|| "Unknown error".to_string()),
            code: parsed.code,
            details: parsed.details,
        },
        Err(_) => StoreFailure::message_only(body.trim()),
    }
}

#[async_trait]
impl CaptionRepo for PostgrestClient {
    async fn list_all(&self, access_token: Option<String>) -> Result<Vec<Caption>, RepoError> {
        let bearer = access_token.as_deref().unwrap_or(&self.anon_key);
        let response = self
            .client
            .get(format!("{}/rest/v1/captions", self.base_url))
            .query(&[("select", "*")])
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| RepoError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response
            .json::<Vec<Caption>>()
            .await
            .map_err(|e| RepoError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl VoteRepo for PostgrestClient {
    async fn insert(&self, vote: NewVote, access_token: &str) -> Result<Vote, RepoError> {
        let row = VoteInsertRow::from(&vote);
        let response = self
            .client
            .post(format!("{}/rest/v1/caption_votes", self.base_url))
            .query(&[("select", VOTE_COLUMNS)])
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(access_token)
            .json(&row)
            .send()
            .await
            .map_err(|e| RepoError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        // PostgREST returns the written rows as an array.
        let mut rows: Vec<Vote> = response
            .json()
            .await
            .map_err(|e| RepoError::InvalidResponse(e.to_string()))?;

        rows.pop()
            .ok_or_else(|| RepoError::InvalidResponse("insert returned no row".to_string()))
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct VoteInsertRow {
    created_datetime_utc: DateTime<Utc>,
    modified_datetime_utc: DateTime<Utc>,
    caption_id: String,
    profile_id: String,
    vote_value: i8,
}

impl From<&NewVote> for VoteInsertRow {
    fn from(vote: &NewVote) -> Self {
        Self {
            created_datetime_utc: vote.created_datetime_utc,
            modified_datetime_utc: vote.modified_datetime_utc,
            caption_id: vote.caption_id.as_str().to_string(),
            profile_id: vote.profile_id.as_str().to_string(),
            vote_value: vote.value.as_i8(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}
