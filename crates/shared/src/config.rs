//! Configuration types for Atrium

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Access-layer configuration (atrium.json)
///
/// Holds the pre-shared cipher key and optional paths to catalog and menu
/// definition files. Loaded once at startup and passed down explicitly; there
/// is no process-wide configuration singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    /// Hex-encoded 256-bit pre-shared key for the payload cipher
    pub cipher_key: String,

    /// Permission catalog definition file (YAML or JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Menu tree definition file (JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_path: Option<PathBuf>,
}

impl AccessConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "cipherKey": "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff",
            "catalogPath": "config/catalog.yaml"
        }"#;

        let config: AccessConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.cipher_key.len(), 64);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("config/catalog.yaml"))
        );
        assert!(config.menu_path.is_none());
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atrium.json");
        std::fs::write(&path, r#"{ "cipherKey": "aabb" }"#).unwrap();

        let config = AccessConfig::from_file(&path).unwrap();
        assert_eq!(config.cipher_key, "aabb");
    }
}
