//! Caption rotation - picks the next unvoted caption to display.
//!
//! State is explicit: callers own the [`VotedSet`] and pass it in on
//! every call, so the selection logic stays a pure function. Randomness
//! is injected as an index-picking closure; production callers hand in
//! an RNG draw, tests hand in a fixed index.

use std::collections::HashSet;

use crate::{Caption, CaptionId};

/// Caption ids the current browsing session has already voted on.
///
/// Ephemeral and client-local: rebuilt as votes succeed, never persisted.
/// The backing store remains the durable source of truth.
#[derive(Debug, Clone, Default)]
pub struct VotedSet(HashSet<CaptionId>);

impl VotedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful vote. Returns false if the id was already present.
    pub fn insert(&mut self, id: CaptionId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: &CaptionId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CaptionId> for VotedSet {
    fn from_iter<I: IntoIterator<Item = CaptionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Select the next caption to show.
///
/// Narrows `captions` to those not yet in `voted`, then picks one with
/// `pick_index`, which receives the remaining count and must return an
/// index in `[0, len)`. Returns `None` when every caption has been
/// voted on (or there are no captions at all).
///
/// Callers must re-invoke with the updated [`VotedSet`] after every
/// successful vote; no rotation state lives here.
pub fn select_next<'a>(
    captions: &'a [Caption],
    voted: &VotedSet,
    pick_index: impl FnOnce(usize) -> usize,
) -> Option<&'a Caption> {
    let remaining: Vec<&Caption> = captions.iter().filter(|c| !voted.contains(&c.id)).collect();
    if remaining.is_empty() {
        return None;
    }
    let idx = pick_index(remaining.len()).min(remaining.len() - 1);
    Some(remaining[idx])
}

/// How many captions are still unvoted. Drives the "remaining" counter
/// in the UI.
pub fn remaining_count(captions: &[Caption], voted: &VotedSet) -> usize {
    captions.iter().filter(|c| !voted.contains(&c.id)).count()
}
