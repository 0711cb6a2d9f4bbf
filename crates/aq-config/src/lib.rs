use aq_core::{Organization, Pollutant, ZeroReading};
use aq_map::NodeType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapConfig {
    pub pollutant: Option<Pollutant>,
    pub node_type: Option<NodeType>,
    pub standards: Option<Organization>,
    pub zero_reading: Option<ZeroReading>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    pub sites_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub map: Option<MapConfig>,
    pub data: Option<DataConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from AQ_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("AQ_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(path)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Get HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.bind.clone())
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
    }

    pub fn pollutant(&self) -> Pollutant {
        self.map.as_ref().and_then(|m| m.pollutant).unwrap_or_default()
    }

    pub fn node_type(&self) -> NodeType {
        self.map.as_ref().and_then(|m| m.node_type).unwrap_or_default()
    }

    pub fn standards(&self) -> Organization {
        self.map.as_ref().and_then(|m| m.standards).unwrap_or_default()
    }

    pub fn zero_reading(&self) -> ZeroReading {
        self.map.as_ref().and_then(|m| m.zero_reading).unwrap_or_default()
    }

    /// Path of the measurements feed snapshot (default sites.json)
    pub fn sites_file(&self) -> PathBuf {
        self.data
            .as_ref()
            .and_then(|d| d.sites_file.clone())
            .unwrap_or_else(|| PathBuf::from("sites.json"))
    }
}
