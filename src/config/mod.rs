//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod types;

pub use types::{LoggingConfig, ProviderConfig, RenderingConfig, SurfaceConfig};

/// Default config directory: XDG config under the service's name, with an
/// /etc fallback for system installs.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from("/etc/cast-presentation-server"),
        |d| d.join("cast-presentation-server"),
    )
}

/// Resolve the log directory, falling back to XDG data.
pub fn resolve_log_dir(configured: &Option<PathBuf>) -> PathBuf {
    configured.clone().unwrap_or_else(|| {
        dirs::data_dir().map_or_else(
            || PathBuf::from("/tmp/cast-presentation-server"),
            |d| d.join("cast-presentation-server/logs"),
        )
    })
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Published surface buffer settings
    pub surface: SurfaceConfig,
    /// Requested rendering attributes
    pub rendering: RenderingConfig,
    /// Event/profile sources for run mode
    pub provider: ProviderConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read config file: {path}"))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Default configuration (every field has a serde default).
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Apply CLI overrides for the provider paths.
    #[must_use]
    pub fn with_overrides(mut self, script: Option<PathBuf>, profile: Option<PathBuf>) -> Self {
        if script.is_some() {
            self.provider.script = script;
        }
        if profile.is_some() {
            self.provider.profile = profile;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.surface.width == 0 || self.surface.height == 0 {
            anyhow::bail!(
                "Surface buffer size must be non-zero: {}x{}",
                self.surface.width,
                self.surface.height
            );
        }

        let r = &self.rendering;
        for (name, bits) in [
            ("red_bits", r.red_bits),
            ("green_bits", r.green_bits),
            ("blue_bits", r.blue_bits),
            ("alpha_bits", r.alpha_bits),
        ] {
            if !(0..=16).contains(&bits) {
                anyhow::bail!("Invalid {name}: {bits} (expected 0-16)");
            }
        }

        if !(0..=32).contains(&r.depth_bits) {
            anyhow::bail!("Invalid depth_bits: {} (expected 0-32)", r.depth_bits);
        }
        if !(0..=16).contains(&r.stencil_bits) {
            anyhow::bail!("Invalid stencil_bits: {} (expected 0-16)", r.stencil_bits);
        }
        if r.multisampling && r.samples < 1 {
            anyhow::bail!(
                "Invalid samples: {} (multisampling needs at least 1)",
                r.samples
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default_config();
        config.validate().unwrap();

        assert_eq!(config.surface.width, 1024);
        assert_eq!(config.rendering.depth_bits, 16);
        assert!(config.rendering.multisampling);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [rendering]
            multisampling = false

            [provider]
            script = "session.toml"
            "#,
        )
        .unwrap();

        assert!(!config.rendering.multisampling);
        assert_eq!(config.rendering.red_bits, 8);
        assert_eq!(config.surface.height, 1024);
        assert_eq!(
            config.provider.script.as_deref(),
            Some(std::path::Path::new("session.toml"))
        );
    }

    #[test]
    fn test_rendering_config_builds_request() {
        let rendering = RenderingConfig {
            multisampling: true,
            samples: 2,
            ..RenderingConfig::default()
        };
        let request = rendering.to_request();

        assert_eq!(request.red(), 8);
        assert_eq!(request.depth(), 16);
        assert_eq!(request.multisampling().map(|m| m.samples), Some(2));

        let plain = RenderingConfig {
            multisampling: false,
            ..rendering
        };
        assert!(plain.to_request().multisampling().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default_config();
        config.surface.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.rendering.alpha_bits = 17;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.rendering.samples = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_replace_only_given_paths() {
        let config = Config::default_config()
            .with_overrides(Some(PathBuf::from("a.toml")), None)
            .with_overrides(None, Some(PathBuf::from("b.toml")));

        assert_eq!(config.provider.script, Some(PathBuf::from("a.toml")));
        assert_eq!(config.provider.profile, Some(PathBuf::from("b.toml")));
    }
}
