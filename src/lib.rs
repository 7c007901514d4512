//! kwok-catalog library
//!
//! Generates the synthetic instance-type catalog a KWOK-backed mock cloud
//! provider loads at startup.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod instance_table;
pub mod pricing;
pub mod sink;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use catalog::{build, build_with, CatalogSummary};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use instance_table::{lookup, SizeSpec};
pub use pricing::price_from_resources;
pub use types::{Architecture, InstanceTypeOptions, Offering, Quantity, ResourceName};
