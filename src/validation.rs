//! Input validation utilities
//!
//! Checks config overrides and command-line instance type names before they
//! reach the catalog builder.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::instance_table::split_instance_type;
use std::collections::HashSet;

/// Validate a list of names from the config (zones, families, sizes).
///
/// The list must be non-empty, and every entry must be non-empty, free of
/// whitespace, and unique.
pub fn validate_name_list(field: &str, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(CatalogError::validation(field, "must contain at least one entry"));
    }

    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(CatalogError::validation(field, "entries must not be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(CatalogError::validation(
                field,
                format!("entry must not contain whitespace, got: {:?}", name),
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(CatalogError::validation(
                field,
                format!("duplicate entry: {}", name),
            ));
        }
    }

    Ok(())
}

/// Validate a whole catalog config
pub fn validate_config(config: &CatalogConfig) -> Result<()> {
    validate_name_list("zones", &config.zones)?;
    validate_name_list("families", &config.families)?;
    validate_name_list("sizes", &config.sizes)?;

    if config.architectures.is_empty() {
        return Err(CatalogError::validation(
            "architectures",
            "must contain at least one entry",
        ));
    }
    let unique: HashSet<_> = config.architectures.iter().collect();
    if unique.len() != config.architectures.len() {
        return Err(CatalogError::validation(
            "architectures",
            "duplicate entry",
        ));
    }

    Ok(())
}

/// Validate an instance type name of the form `<family>.<size>`
///
/// Returns the family and size on success.
pub fn validate_instance_type_name(name: &str) -> Result<(&str, &str)> {
    split_instance_type(name).ok_or_else(|| {
        CatalogError::validation(
            "instance_type",
            format!("Instance type must look like <family>.<size>, got: {}", name),
        )
    })
}
