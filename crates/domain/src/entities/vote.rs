//! Vote entity - a single user's rating of one caption.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{CaptionId, DomainError, ProfileId, VoteId};

/// An upvote or downvote. On the wire this is exactly the integer
/// `1` or `-1`; every other value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub fn from_i64(value: i64) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(DomainError::validation(format!(
                "vote value must be 1 or -1, got {other}"
            ))),
        }
    }
}

impl Serialize for VoteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for VoteValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::from_i64(raw).map_err(de::Error::custom)
    }
}

/// A vote row as returned by the backing store after insertion.
///
/// Column names match the hosted table, so the row serializes to the
/// wire shape unchanged. At most one row exists per
/// (profile_id, caption_id) pair; the store's uniqueness constraint
/// enforces that, not this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub created_datetime_utc: DateTime<Utc>,
    pub modified_datetime_utc: DateTime<Utc>,
    pub caption_id: CaptionId,
    pub profile_id: ProfileId,
    pub vote_value: VoteValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_value_round_trips() {
        assert_eq!(
            serde_json::to_string(&VoteValue::Up).expect("serialize"),
            "1"
        );
        assert_eq!(
            serde_json::to_string(&VoteValue::Down).expect("serialize"),
            "-1"
        );
        let up: VoteValue = serde_json::from_str("1").expect("deserialize");
        assert_eq!(up, VoteValue::Up);
    }

    #[test]
    fn vote_value_rejects_out_of_range_integers() {
        assert!(serde_json::from_str::<VoteValue>("0").is_err());
        assert!(serde_json::from_str::<VoteValue>("2").is_err());
        assert!(serde_json::from_str::<VoteValue>("\"1\"").is_err());
    }

    #[test]
    fn vote_row_parses_store_response() {
        let json = r#"{
            "id": "v1",
            "created_datetime_utc": "2025-06-15T10:30:00Z",
            "modified_datetime_utc": "2025-06-15T10:30:00Z",
            "caption_id": "c1",
            "profile_id": "p1",
            "vote_value": -1
        }"#;
        let vote: Vote = serde_json::from_str(json).expect("deserialize");
        assert_eq!(vote.caption_id, CaptionId::new("c1"));
        assert_eq!(vote.vote_value, VoteValue::Down);
        assert_eq!(vote.created_datetime_utc, vote.modified_datetime_utc);
    }
}
