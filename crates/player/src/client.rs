//! HTTP client for the engine's API.

use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, StatusCode};

use caprate_shared::{
    CaptionData, CaptionsResponse, ErrorResponse, MeResponse, UserData, VoteAccepted, VoteData,
    VoteRequest,
};

/// What one vote submission came back as, mirroring the API's status
/// taxonomy. Transport failures surface as `anyhow` errors instead.
#[derive(Debug)]
pub enum VoteReply {
    Accepted(VoteData),
    /// 401 - the session is missing or stale.
    Unauthenticated,
    /// 409 - informational; this caption was already rated.
    AlreadyVoted,
    /// 403 - the write policy said no.
    Rejected(String),
    /// 500-class - unexpected store failure, with diagnostics.
    Failed(String),
}

pub struct EngineClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl EngineClient {
    pub fn new(base_url: &str, access_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Who is signed in, if anyone.
    pub async fn me(&self) -> anyhow::Result<Option<UserData>> {
        let response = self.get("/api/me").send().await.context("GET /api/me")?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let body: MeResponse = response
            .error_for_status()
            .context("GET /api/me")?
            .json()
            .await
            .context("parse /api/me body")?;
        Ok(Some(body.user))
    }

    /// The full caption set, fetched once per session.
    pub async fn captions(&self) -> anyhow::Result<Vec<CaptionData>> {
        let body: CaptionsResponse = self
            .get("/api/captions")
            .send()
            .await
            .context("GET /api/captions")?
            .error_for_status()
            .context("GET /api/captions")?
            .json()
            .await
            .context("parse /api/captions body")?;
        Ok(body.captions)
    }

    /// Submit one vote and classify the reply by status code.
    pub async fn vote(&self, caption_id: &str, value: i8) -> anyhow::Result<VoteReply> {
        let mut request = self.client.post(format!("{}/api/vote", self.base_url));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .json(&VoteRequest {
                caption_id: caption_id.to_string(),
                value,
            })
            .send()
            .await
            .context("POST /api/vote")?;

        let status = response.status();
        if status == StatusCode::OK {
            let body: VoteAccepted = response.json().await.context("parse vote body")?;
            return Ok(VoteReply::Accepted(body.vote));
        }

        let error: ErrorResponse = response
            .json()
            .await
            .unwrap_or_else(|_| ErrorResponse::new("Vote failed."));

        Ok(match status {
            StatusCode::UNAUTHORIZED => VoteReply::Unauthenticated,
            StatusCode::CONFLICT => VoteReply::AlreadyVoted,
            StatusCode::FORBIDDEN => VoteReply::Rejected(error.error),
            _ => {
                let detail = error
                    .last_error
                    .map(|e| format!(" ({})", e.message))
                    .unwrap_or_default();
                VoteReply::Failed(format!("{}{detail}", error.error))
            }
        })
    }
}
