//! Caprate Shared - types shared between Engine and Player.
//!
//! This crate contains the wire-format DTOs for the engine's HTTP API.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - DTOs carry raw `String` identifiers

pub mod requests;
pub mod responses;

pub use requests::VoteRequest;
pub use responses::{
    CaptionData, CaptionsResponse, ErrorResponse, MeResponse, StoreErrorBody, UserData,
    VoteAccepted, VoteData,
};
