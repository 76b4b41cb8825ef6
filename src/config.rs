use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CamlinkConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BridgeConfig {
    /// Depth of the command queue between callers and the controller
    #[serde(default = "default_command_queue_capacity")]
    pub command_queue_capacity: usize,

    /// Depth of the driver event queue into the controller
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CaptureConfig {
    /// Capture quality on a 0-100 scale, used when the caller omits one
    #[serde(default = "default_capture_quality")]
    pub default_quality: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PreviewConfig {
    /// Camera position when the caller omits one ("rear" or "front")
    #[serde(default = "default_preview_position")]
    pub default_position: String,

    /// Stack the preview behind the host UI by default
    #[serde(default)]
    pub to_back: bool,
}

impl CamlinkConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("camlink.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            // Start with default values
            .set_default(
                "bridge.command_queue_capacity",
                default_command_queue_capacity() as i64,
            )?
            .set_default(
                "bridge.event_queue_capacity",
                default_event_queue_capacity() as i64,
            )?
            .set_default("capture.default_quality", default_capture_quality() as i64)?
            .set_default("preview.default_position", default_preview_position())?
            .set_default("preview.to_back", false)?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables with CAMLINK_ prefix
            .add_source(Environment::with_prefix("CAMLINK").separator("__"))
            .build()?;

        let config: CamlinkConfig = settings.try_deserialize()?;
        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge.command_queue_capacity == 0 {
            return Err(ConfigError::Message(
                "bridge.command_queue_capacity must be greater than 0".to_string(),
            ));
        }

        if self.bridge.event_queue_capacity == 0 {
            return Err(ConfigError::Message(
                "bridge.event_queue_capacity must be greater than 0".to_string(),
            ));
        }

        if self.capture.default_quality > 100 {
            return Err(ConfigError::Message(
                "capture.default_quality must be between 0 and 100".to_string(),
            ));
        }

        Ok(())
    }

    /// Render the configuration as TOML, e.g. for `--print-config`
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for CamlinkConfig {
    fn default() -> Self {
        Self {
            bridge: BridgeConfig::default(),
            capture: CaptureConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command_queue_capacity: default_command_queue_capacity(),
            event_queue_capacity: default_event_queue_capacity(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            default_quality: default_capture_quality(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_position: default_preview_position(),
            to_back: false,
        }
    }
}

fn default_command_queue_capacity() -> usize {
    16
}
fn default_event_queue_capacity() -> usize {
    32
}
fn default_capture_quality() -> u8 {
    85
}
fn default_preview_position() -> String {
    "rear".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_config_file() -> tempfile::NamedTempFile {
        Builder::new().suffix(".toml").tempfile().unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = CamlinkConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.capture.default_quality, 85);
        assert_eq!(config.preview.default_position, "rear");
        assert!(!config.preview.to_back);
    }

    #[test]
    fn test_zero_queue_capacity_fails_validation() {
        let config = CamlinkConfig {
            bridge: BridgeConfig {
                command_queue_capacity: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_quality_fails_validation() {
        let config = CamlinkConfig {
            capture: CaptureConfig {
                default_quality: 101,
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = CamlinkConfig::load_from_file("/nonexistent/camlink.toml").unwrap();

        assert_eq!(config.capture.default_quality, 85);
        assert_eq!(config.bridge.command_queue_capacity, 16);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = temp_config_file();
        writeln!(
            file,
            "[capture]\ndefault_quality = 70\n\n[preview]\ndefault_position = \"front\"\nto_back = true\n"
        )
        .unwrap();

        let config = CamlinkConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.capture.default_quality, 70);
        assert_eq!(config.preview.default_position, "front");
        assert!(config.preview.to_back);
        // Untouched sections keep their defaults
        assert_eq!(config.bridge.event_queue_capacity, 32);
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let mut file = temp_config_file();
        writeln!(file, "[capture]\ndefault_quality = 250\n").unwrap();

        assert!(CamlinkConfig::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = CamlinkConfig::default();
        let rendered = config.to_toml().unwrap();

        assert!(rendered.contains("default_quality = 85"));
        assert!(rendered.contains("default_position = \"rear\""));
    }
}
