//! Application configuration: viewer settings plus the serial link
use imucube_core::{ConfigError, ViewerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub viewer: ViewerConfig,
    pub serial: SerialConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port name, e.g. `/dev/ttyUSB0` or `COM3`.
    pub port: String,
    /// Must match the sending sketch.
    pub baud_rate: u32,
    /// Read timeout handed to the driver.
    pub timeout_ms: u64,
    /// Wait after opening before discarding stale input.
    pub settle_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port().to_string(),
            baud_rate: 9600,
            timeout_ms: 1000,
            settle_ms: 2000,
        }
    }
}

fn default_port() -> &'static str {
    if cfg!(windows) {
        "COM3"
    } else {
        "/dev/ttyUSB0"
    }
}

impl AppConfig {
    /// Parse from TOML text and validate
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config = Self::from_toml(&text)?;
                info!(?path, "Loaded config");
                Ok(config)
            }
            None => {
                info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewer.validate()?;
        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::invalid("serial.port", "must not be empty"));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::invalid("serial.baud_rate", "must be positive"));
        }
        Ok(())
    }
}
