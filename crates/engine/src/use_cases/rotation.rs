//! Next-caption use case.
//!
//! Wraps the domain selector with the engine's randomness port. The
//! selector itself stays pure; this is the only place a real RNG meets
//! the rotation.

use std::sync::Arc;

use caprate_domain::{rotation, Caption, VotedSet};

use crate::infrastructure::ports::RandomPort;

/// Pick a random unvoted caption for display.
pub struct NextCaption {
    random: Arc<dyn RandomPort>,
}

impl NextCaption {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// `None` means everything has been rated. Callers re-run this after
    /// each successful vote with the updated voted set.
    pub fn execute<'a>(&self, captions: &'a [Caption], voted: &VotedSet) -> Option<&'a Caption> {
        rotation::select_next(captions, voted, |len| self.random.gen_index(len))
    }
}

#[cfg(test)]
mod tests {
    use caprate_domain::CaptionId;

    use crate::infrastructure::clock::FixedRandom;

    use super::*;

    #[test]
    fn skips_voted_captions() {
        let captions = vec![
            Caption::new("a", "first"),
            Caption::new("b", "second"),
            Caption::new("c", "third"),
        ];
        let voted: VotedSet = [CaptionId::new("a")].into_iter().collect();

        let use_case = NextCaption::new(Arc::new(FixedRandom(0)));
        let chosen = use_case.execute(&captions, &voted).expect("two remain");
        assert_eq!(chosen.id, CaptionId::new("b"));
    }

    #[test]
    fn exhausted_rotation_yields_none() {
        let captions = vec![Caption::new("a", "only")];
        let voted: VotedSet = [CaptionId::new("a")].into_iter().collect();

        let use_case = NextCaption::new(Arc::new(FixedRandom(0)));
        assert!(use_case.execute(&captions, &voted).is_none());
    }
}
