//! Domain models for the Inventory & Sales Management Platform

mod sale;

pub use sale::*;
