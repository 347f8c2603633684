//! External dependency implementations (ports + adapters).

pub mod clock;
pub mod ports;
pub mod supabase;
