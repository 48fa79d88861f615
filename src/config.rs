//! Configuration management for trackbridge
//!
//! Defaults applied when the bridge caller omits load options.
//! Config is stored at ~/.config/trackbridge/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Crate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Device-preferred locale used when a load omits `preferredLocale`
    pub preferred_locale: Option<String>,
    /// Subtitle locale used when a load omits `subtitleLocale`
    pub default_subtitle_locale: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/trackbridge/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trackbridge").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_has_no_locales() {
        let config = Config::default();
        assert!(config.preferred_locale.is_none());
        assert!(config.default_subtitle_locale.is_none());
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = Config {
            preferred_locale: Some("en".to_string()),
            default_subtitle_locale: None,
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.preferred_locale.as_deref(), Some("en"));
        assert!(parsed.default_subtitle_locale.is_none());
    }
}
