//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{AuthPort, CaptionRepo, ClockPort, RandomPort, VoteRepo},
};
use crate::use_cases::{
    CurrentUser, ExchangeCode, ListCaptions, NextCaption, SignInUrl, SignOut, SubmitVote,
};

/// Site-level settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Public base URL of this application (for OAuth redirect targets).
    pub site_url: String,
    /// OAuth provider name passed to the identity provider.
    pub oauth_provider: String,
}

/// Main application state.
///
/// Holds all use cases, passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub config: SiteConfig,
}

/// Container for all use cases.
pub struct UseCases {
    pub submit_vote: SubmitVote,
    pub next_caption: NextCaption,
    pub list_captions: ListCaptions,
    pub current_user: CurrentUser,
    pub exchange_code: ExchangeCode,
    pub sign_out: SignOut,
    pub sign_in_url: SignInUrl,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        auth: Arc<dyn AuthPort>,
        captions: Arc<dyn CaptionRepo>,
        votes: Arc<dyn VoteRepo>,
        config: SiteConfig,
    ) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());

        Self {
            use_cases: UseCases {
                submit_vote: SubmitVote::new(auth.clone(), votes, clock),
                next_caption: NextCaption::new(random),
                list_captions: ListCaptions::new(captions),
                current_user: CurrentUser::new(auth.clone()),
                exchange_code: ExchangeCode::new(auth.clone()),
                sign_out: SignOut::new(auth.clone()),
                sign_in_url: SignInUrl::new(auth),
            },
            config,
        }
    }
}
