use crate::error::{ConfigError, Result};
use crate::instance_table::{INSTANCE_FAMILIES, INSTANCE_SIZES, KWOK_ZONES};
use crate::types::Architecture;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Local config file name, looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = ".kwok-catalog.toml";

/// Enumerations the catalog builder iterates over
///
/// Defaults reproduce the fixed families, sizes, zones and architectures, so
/// a run without a config file always yields the same catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub zones: Vec<String>,
    pub families: Vec<String>,
    pub sizes: Vec<String>,
    pub architectures: Vec<Architecture>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            zones: KWOK_ZONES.iter().map(|z| z.to_string()).collect(),
            families: INSTANCE_FAMILIES.iter().map(|f| f.to_string()).collect(),
            sizes: INSTANCE_SIZES.iter().map(|s| s.to_string()).collect(),
            architectures: Architecture::ALL.to_vec(),
        }
    }
}

impl CatalogConfig {
    /// Resolve the config path: explicit path, then `.kwok-catalog.toml`,
    /// then `~/.config/kwok-catalog/config.toml`.
    fn resolve_path(path: Option<&Path>) -> PathBuf {
        if let Some(p) = path {
            return p.to_path_buf();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            local
        } else {
            dirs::config_dir()
                .map(|d| d.join("kwok-catalog").join("config.toml"))
                .unwrap_or(local)
        }
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path);

        if config_path.exists() {
            debug!("Loading config from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path).map_err(|e| {
                ConfigError::NotFound(format!("{}: {}", config_path.display(), e))
            })?;
            let config: CatalogConfig = toml::from_str(&content).map_err(|e| {
                ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
            })?;
            Ok(config)
        } else {
            // Defaults, but warn if the user explicitly asked for a file
            if path.is_some() {
                warn!(
                    "Config file not found: {}. Using built-in enumerations. Run 'kwok-catalog init' to create one.",
                    config_path.display()
                );
            }
            Ok(CatalogConfig::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = CatalogConfig::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = CatalogConfig::default();
        assert_eq!(config.zones.len(), 4);
        assert_eq!(config.families.len(), 17);
        assert_eq!(config.sizes.len(), 9);
        assert_eq!(
            config.architectures,
            vec![Architecture::Amd64, Architecture::Arm64]
        );
        assert_eq!(config.zones[0], "test-zone-a");
        assert_eq!(config.families[0], "m7i-flex");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let config = CatalogConfig::default();
        assert!(config.save(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded = CatalogConfig::load(Some(&config_path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_override() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "zones = [\"zone-1\"]\narchitectures = [\"arm64\"]\n")
            .unwrap();

        let config = CatalogConfig::load(Some(&config_path)).unwrap();
        assert_eq!(config.zones, vec!["zone-1".to_string()]);
        assert_eq!(config.architectures, vec![Architecture::Arm64]);
        // Unset fields keep their defaults
        assert_eq!(config.families.len(), 17);
        assert_eq!(config.sizes.len(), 9);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let fake_path = temp_dir.path().join("nonexistent.toml");

        let config = CatalogConfig::load(Some(&fake_path)).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid toml content {").unwrap();

        let result = CatalogConfig::load(Some(&config_path));
        assert!(matches!(
            result,
            Err(CatalogError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_config_rejects_unknown_architecture() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("arch.toml");
        std::fs::write(&config_path, "architectures = [\"riscv64\"]\n").unwrap();

        assert!(CatalogConfig::load(Some(&config_path)).is_err());
    }

    #[test]
    fn test_init_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("init_test.toml");

        assert!(init_config(&config_path).is_ok());
        assert!(config_path.exists());

        let config = CatalogConfig::load(Some(&config_path)).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }
}
