//! Domain entities.

mod caption;
mod user;
mod vote;

pub use caption::Caption;
pub use user::{AuthSession, AuthenticatedUser};
pub use vote::{Vote, VoteValue};
