//! Request bodies accepted by the engine's HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/vote`.
///
/// `{ "captionId": "...", "value": 1 | -1 }`. The engine deliberately
/// re-validates the raw JSON shape server-side rather than trusting
/// this type, so malformed payloads classify as a 400 instead of a
/// framework deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub caption_id: String,
    pub value: i8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_request_uses_camel_case_on_the_wire() {
        let req = VoteRequest {
            caption_id: "c1".to_string(),
            value: -1,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["captionId"], "c1");
        assert_eq!(json["value"], -1);
    }
}
