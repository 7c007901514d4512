//! Error types for kwok-catalog
//!
//! This module defines the error handling strategy for kwok-catalog. There are two
//! error types: `CatalogError` (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `CatalogError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling. The conversion
//! happens at the CLI boundary using `anyhow::Error::from` to preserve error chains.
//!
//! Catalog construction itself never fails: the resource table and the
//! enumerations are constants, and an undefined family/size pair is skipped,
//! not reported. Errors only appear at the edges:
//!
//! - `Json`: the catalog sink could not encode or decode the document
//! - `Io`: writing the document (or reading one back) failed
//! - `Config`: a configuration file could not be read or parsed
//!   - Automatically converted from `ConfigError` via `#[from]`
//! - `Validation`: user input (config overrides, lookup arguments) is invalid
//! - `InvalidQuantity`: a resource quantity string could not be parsed

use thiserror::Error;

/// Main error type for kwok-catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid resource quantity: {0}")]
    InvalidQuantity(String),

    #[error("could not marshal generated instance types to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Shorthand for building a `Validation` error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
