//! API layer - HTTP entry points.

pub mod cookies;
pub mod http;
