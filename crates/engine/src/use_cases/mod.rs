//! User story orchestration.

pub mod auth;
pub mod captions;
pub mod rotation;
pub mod vote;

pub use auth::{CurrentUser, ExchangeCode, SignInUrl, SignOut};
pub use captions::ListCaptions;
pub use rotation::NextCaption;
pub use vote::{SubmitVote, VoteOutcome};
