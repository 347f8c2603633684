//! Supabase-style backend adapters.
//!
//! Two HTTP clients against the hosted project: GoTrue for identity
//! and PostgREST for table access. Both speak plain JSON over reqwest.

pub mod auth;
pub mod rest;

pub use auth::GoTrueClient;
pub use rest::PostgrestClient;

/// Request timeout applied to every backend call. Nothing here retries;
/// a call either resolves within this bound or fails the submission.
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 10;
