use crate::domain::config::AtLinkConfig;
use crate::domain::error::{AtLinkError, AtLinkResult};
use std::fs;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> AtLinkResult<AtLinkConfig> {
    let content = fs::read_to_string(path).map_err(|e| AtLinkError::Config {
        message: format!("Failed to read config file {}: {}", path.display(), e),
    })?;

    toml::from_str(&content).map_err(|e| AtLinkError::Config {
        message: format!("Failed to parse config file {}: {}", path.display(), e),
    })
}

/// Save configuration to a TOML file
pub fn save_config(path: &Path, config: &AtLinkConfig) -> AtLinkResult<()> {
    let content = toml::to_string_pretty(config).map_err(|e| AtLinkError::Config {
        message: format!("Failed to serialize config: {}", e),
    })?;

    fs::write(path, content).map_err(|e| AtLinkError::Config {
        message: format!("Failed to write config file {}: {}", path.display(), e),
    })
}
