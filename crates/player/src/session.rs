//! Client-local rotation state.
//!
//! Owns the captions fetched at startup and the ephemeral voted set.
//! State changes go through explicit methods on the single client task;
//! one update per completed submission, applied in completion order.

use caprate_domain::{remaining_count, rotation, Caption, CaptionId, VotedSet};
use caprate_shared::CaptionData;

pub struct RotationSession {
    captions: Vec<Caption>,
    voted: VotedSet,
}

impl RotationSession {
    pub fn new(captions: Vec<Caption>) -> Self {
        Self {
            captions,
            voted: VotedSet::new(),
        }
    }

    /// Build the session from the wire DTOs of `GET /api/captions`.
    pub fn from_wire(captions: Vec<CaptionData>) -> Self {
        Self::new(
            captions
                .into_iter()
                .map(|c| Caption {
                    id: CaptionId::new(c.id),
                    content: c.content,
                    extra: c.extra,
                })
                .collect(),
        )
    }

    /// Pick the next unvoted caption. `None` when the rotation is done.
    pub fn select_with(&self, pick_index: impl FnOnce(usize) -> usize) -> Option<Caption> {
        rotation::select_next(&self.captions, &self.voted, pick_index).cloned()
    }

    /// Record a completed vote so the caption never comes up again this
    /// session.
    pub fn record_vote(&mut self, id: CaptionId) {
        self.voted.insert(id);
    }

    pub fn remaining(&self) -> usize {
        remaining_count(&self.captions, &self.voted)
    }

    pub fn total(&self) -> usize {
        self.captions.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn session(ids: &[&str]) -> RotationSession {
        RotationSession::new(
            ids.iter()
                .map(|id| Caption::new(*id, format!("caption {id}")))
                .collect(),
        )
    }

    #[test]
    fn accepted_vote_removes_the_caption_from_rotation() {
        let mut session = session(&["c1", "c2", "c3"]);
        session.record_vote(CaptionId::new("c2"));
        assert_eq!(session.remaining(), 2);

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let next = session
                .select_with(|len| rng.gen_range(0..len))
                .expect("two captions remain");
            assert_ne!(next.id, CaptionId::new("c2"));
        }
    }

    #[test]
    fn rotation_ends_after_every_caption_is_voted() {
        let mut session = session(&["c1", "c2"]);
        session.record_vote(CaptionId::new("c1"));
        session.record_vote(CaptionId::new("c2"));
        assert_eq!(session.remaining(), 0);
        assert!(session.select_with(|_| 0).is_none());
    }

    #[test]
    fn wire_captions_carry_over() {
        let session = RotationSession::from_wire(vec![CaptionData {
            id: "c1".to_string(),
            content: Some("hello".to_string()),
            extra: serde_json::Map::new(),
        }]);
        assert_eq!(session.total(), 1);
        let caption = session.select_with(|_| 0).expect("one caption");
        assert_eq!(caption.content.as_deref(), Some("hello"));
    }
}
