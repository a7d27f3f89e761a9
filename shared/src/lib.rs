//! Shared types and helpers for the Inventory & Sales Management Platform
//!
//! This crate contains the wire models and domain helpers used by the
//! backend and its test suites.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
