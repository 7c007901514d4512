//! Exit code standardization for kwok-catalog
//!
//! Provides consistent exit codes so scripts that regenerate the catalog can
//! tell a bad invocation apart from a failed write.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success
//! - `1` = User error (invalid input, validation failure, unknown instance type)
//! - `2` = System error (serialization failure, I/O error)
//! - `3` = Configuration error (config parse error, unreadable config)

use crate::error::CatalogError;

/// Standard exit codes for kwok-catalog
pub mod codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// User error (invalid input, validation failure)
    pub const USER_ERROR: i32 = 1;
    /// System error (serialization, I/O)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (unreadable or malformed config)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map a CatalogError to an appropriate exit code
pub fn exit_code_for_error(error: &CatalogError) -> i32 {
    use CatalogError::*;
    match error {
        Config(_) => codes::CONFIG_ERROR,

        Validation { .. } => codes::USER_ERROR,
        InvalidQuantity(_) => codes::USER_ERROR,

        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

/// Map an anyhow error coming out of the CLI layer to an exit code.
///
/// Walks the chain looking for a `CatalogError`; anything else is a system error.
pub fn exit_code_for_anyhow(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CatalogError>())
        .map(exit_code_for_error)
        .unwrap_or(codes::SYSTEM_ERROR)
}
