use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::oci::config::DEFAULT_PROFILE;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("compartment_id is not set (config file or COMPARTMENT_ID)")]
    MissingCompartment,
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub compartment_id: String,
    #[serde(default = "default_oci_config_file")]
    pub oci_config_file: String,
    #[serde(default = "default_oci_profile")]
    pub oci_profile: String,
    /// Overrides the regional vision endpoint, e.g. for a private endpoint.
    #[serde(default)]
    pub vision_endpoint: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub frontend_dir: Option<String>,
}

fn default_oci_config_file() -> String {
    "~/.oci/config".to_string()
}

fn default_oci_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

fn default_port() -> u16 {
    8081
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            compartment_id: String::new(),
            oci_config_file: default_oci_config_file(),
            oci_profile: default_oci_profile(),
            vision_endpoint: None,
            port: default_port(),
            frontend_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads `APP_CONFIG` (or `config/app.yaml` next to the workspace) and
    /// applies environment overrides. A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("APP_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());

        let config = if path.exists() {
            log::info!("Loading config from {}", path.display());
            Self::from_file(&path)?
        } else {
            log::warn!("No config file at {}; using defaults", path.display());
            Self::default()
        };

        config
            .with_overrides(|key| std::env::var(key).ok())?
            .validated()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(compartment_id) = lookup("COMPARTMENT_ID") {
            self.compartment_id = compartment_id;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        Ok(self)
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.compartment_id.trim().is_empty() {
            return Err(ConfigError::MissingCompartment);
        }
        Ok(self)
    }

    pub fn frontend_dir(&self) -> String {
        self.frontend_dir.clone().unwrap_or_else(|| {
            if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
                format!("{}/../frontend/dist", manifest_dir)
            } else {
                "/usr/src/app/frontend/dist".to_string()
            }
        })
    }
}

fn default_config_path() -> PathBuf {
    match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(manifest_dir) => PathBuf::from(format!("{}/../config/app.yaml", manifest_dir)),
        Err(_) => PathBuf::from("config/app.yaml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn yaml_fills_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("compartment_id: ocid1.compartment.oc1..abc\n").unwrap();
        assert_eq!(config.compartment_id, "ocid1.compartment.oc1..abc");
        assert_eq!(config.oci_config_file, "~/.oci/config");
        assert_eq!(config.oci_profile, "DEFAULT");
        assert_eq!(config.port, 8081);
        assert!(config.vision_endpoint.is_none());
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [("COMPARTMENT_ID", "from-env"), ("PORT", "9000")].into();
        let config = AppConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.compartment_id, "from-env");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = AppConfig::default()
            .with_overrides(|key| (key == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "eighty"));
    }

    #[test]
    fn compartment_is_required() {
        let err = AppConfig::default().validated().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCompartment));
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "compartment_id: c1\noci_profile: FRANKFURT\nport: 8080").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.oci_profile, "FRANKFURT");
        assert_eq!(config.port, 8080);
    }
}
