//! Vote submission use case.
//!
//! One pass, no retries: validate -> authenticate -> write -> classify.
//! Every branch is a terminal outcome returned to the caller.

pub mod classify;

use std::sync::Arc;

use caprate_domain::{CaptionId, Vote, VoteValue};

use crate::infrastructure::ports::{
    AuthPort, ClockPort, NewVote, RepoError, StoreFailure, VoteRepo,
};
use classify::{classify_store_failure, StoreRejection};

/// 400 message for every malformed payload shape, matching the wire
/// contract of the API.
const INVALID_PAYLOAD: &str = "Invalid payload. Expected { captionId: string, value: 1 | -1 }.";

/// Terminal classification of one vote submission.
#[derive(Debug)]
pub enum VoteOutcome {
    /// The row was written; carries it as returned by the store.
    Accepted(Vote),
    /// Malformed payload; nothing was written.
    InvalidPayload(String),
    /// No resolvable identity; nothing was written.
    Unauthenticated,
    /// Authenticated, but the store's write policy rejected the row.
    Forbidden(String),
    /// A vote for this (profile, caption) pair already exists.
    Conflict,
    /// Unexpected store failure, surfaced with diagnostics.
    StoreFailed(StoreFailure),
}

/// Validated body of a vote submission.
#[derive(Debug, PartialEq, Eq)]
struct VotePayload {
    caption_id: CaptionId,
    value: VoteValue,
}

impl VotePayload {
    /// Parse the raw request JSON. The shape is checked field by field
    /// (`captionId` a non-empty string, `value` a number equal to 1 or
    /// -1) so that strings like `"1"`, out-of-range numbers, and
    /// non-object bodies all land in the same invalid-payload outcome.
    fn parse(body: &serde_json::Value) -> Result<Self, String> {
        let caption_id = body
            .get("captionId")
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| INVALID_PAYLOAD.to_string())?;

        let value = body
            .get("value")
            .and_then(Self::as_whole_number)
            .and_then(|v| VoteValue::from_i64(v).ok())
            .ok_or_else(|| INVALID_PAYLOAD.to_string())?;

        Ok(Self {
            caption_id: CaptionId::new(caption_id),
            value,
        })
    }

    /// JSON numbers arrive as integers or floats depending on the
    /// client's serializer; `1.0` counts as the integer 1.
    fn as_whole_number(value: &serde_json::Value) -> Option<i64> {
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }
}

/// Submit one vote on behalf of the caller.
pub struct SubmitVote {
    auth: Arc<dyn AuthPort>,
    votes: Arc<dyn VoteRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SubmitVote {
    pub fn new(auth: Arc<dyn AuthPort>, votes: Arc<dyn VoteRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { auth, votes, clock }
    }

    /// Run the submission pipeline against the raw request body.
    ///
    /// Concurrent submissions for the same (profile, caption) pair are
    /// both sent to the store; its uniqueness constraint decides which
    /// one lands and which one classifies as [`VoteOutcome::Conflict`].
    pub async fn execute(
        &self,
        body: &serde_json::Value,
        access_token: Option<&str>,
    ) -> VoteOutcome {
        let payload = match VotePayload::parse(body) {
            Ok(payload) => payload,
            Err(message) => return VoteOutcome::InvalidPayload(message),
        };

        let Some(token) = access_token else {
            return VoteOutcome::Unauthenticated;
        };

        let user = match self.auth.current_user(token).await {
            Ok(Some(user)) => user,
            Ok(None) => return VoteOutcome::Unauthenticated,
            Err(e) => {
                tracing::debug!(error = %e, "identity lookup failed");
                return VoteOutcome::Unauthenticated;
            }
        };

        let now = self.clock.now();
        let new_vote = NewVote {
            caption_id: payload.caption_id,
            profile_id: user.id,
            value: payload.value,
            created_datetime_utc: now,
            modified_datetime_utc: now,
        };

        match self.votes.insert(new_vote, token).await {
            Ok(vote) => {
                tracing::info!(caption_id = %vote.caption_id, profile_id = %vote.profile_id, "vote recorded");
                VoteOutcome::Accepted(vote)
            }
            Err(RepoError::Rejected(failure)) => match classify_store_failure(failure) {
                StoreRejection::Forbidden(message) => VoteOutcome::Forbidden(message),
                StoreRejection::Duplicate => VoteOutcome::Conflict,
                StoreRejection::Other(failure) => {
                    tracing::warn!(message = %failure.message, code = ?failure.code, "vote insert failed");
                    VoteOutcome::StoreFailed(failure)
                }
            },
            Err(other) => {
                tracing::warn!(error = %other, "vote insert failed before reaching the store");
                VoteOutcome::StoreFailed(StoreFailure::message_only(other.to_string()))
            }
        }
    }
}
