//! Caprate Domain - caption rating types and the rotation selector.
//!
//! Pure types only: no I/O, no async, no ambient randomness. The one
//! algorithm here (rotation selection) takes its randomness as an
//! injected closure so it is deterministic under test.

pub mod entities;
pub mod error;
pub mod ids;
pub mod rotation;

pub use entities::{AuthSession, AuthenticatedUser, Caption, Vote, VoteValue};
pub use error::DomainError;
pub use ids::{CaptionId, ProfileId, VoteId};
pub use rotation::{remaining_count, select_next, VotedSet};
