//! Wire and domain models for the inventory and sales API
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
