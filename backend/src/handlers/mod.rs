//! HTTP handlers

pub mod catalog;
pub mod client;
pub mod health;
pub mod product;
pub mod reporting;
pub mod sale;

pub use catalog::*;
pub use client::*;
pub use health::*;
pub use product::*;
pub use reporting::*;
pub use sale::*;
