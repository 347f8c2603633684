//! Response bodies produced by the engine's HTTP API.

use serde::{Deserialize, Serialize};

/// A caption as served by `GET /api/captions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionData {
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `GET /api/captions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionsResponse {
    pub captions: Vec<CaptionData>,
}

/// The signed-in user, as served by `GET /api/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `GET /api/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserData,
}

/// A persisted vote row, column names as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteData {
    pub id: String,
    pub created_datetime_utc: String,
    pub modified_datetime_utc: String,
    pub caption_id: String,
    pub profile_id: String,
    pub vote_value: i8,
}

/// 200 body for `POST /api/vote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteAccepted {
    pub ok: bool,
    pub vote: VoteData,
}

/// Diagnostic detail attached to 500 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error body for every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<StoreErrorBody>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            last_error: None,
        }
    }

    pub fn with_detail(error: impl Into<String>, detail: StoreErrorBody) -> Self {
        Self {
            error: error.into(),
            last_error: Some(detail),
        }
    }
}
