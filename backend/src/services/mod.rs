//! Business logic services for the inventory and sales API

pub mod catalog;
pub mod client;
pub mod product;
pub mod reporting;
pub mod sale;

pub use catalog::CatalogService;
pub use client::ClientService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use sale::SaleService;
