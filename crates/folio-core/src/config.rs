//! Configuration loading and validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

/// Window / surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title (native) / document title (web)
    #[serde(default = "default_title")]
    pub title: String,
    /// CSS selector of the canvas element the renderer attaches to (web only)
    #[serde(default = "default_canvas")]
    pub canvas: String,
    /// Pixel-density override. Pinned low to bound rendering cost on
    /// constrained devices.
    #[serde(default = "default_pixel_density")]
    pub pixel_density: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            canvas: default_canvas(),
            pixel_density: default_pixel_density(),
        }
    }
}

fn default_title() -> String {
    "Folio".to_string()
}

fn default_canvas() -> String {
    "#folio-canvas".to_string()
}

fn default_pixel_density() -> f32 {
    1.0
}

/// Render-loop mode for the 3D showcase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrameloopMode {
    /// Continuous redraw. Smooth animation at the cost of battery/CPU.
    #[default]
    Always,
    /// Redraw on input/window events only, with a low idle rate.
    Reactive,
}

/// 3D showcase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Asset path of the showcase model (GLTF/GLB)
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Yaw angular rate in radians per second
    #[serde(default = "default_spin_rate")]
    pub spin_rate: f32,
    /// Whether the spot light casts shadows
    #[serde(default)]
    pub cast_shadows: bool,
    #[serde(default)]
    pub frameloop: FrameloopMode,
    /// Drop to reactive rendering on mobile layouts, overriding `frameloop`.
    /// Off by default: the showcase animates continuously unless asked not to.
    #[serde(default)]
    pub mobile_power_saver: bool,
    /// Viewport width at or below which the Mobile presets apply
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            spin_rate: default_spin_rate(),
            cast_shadows: false,
            frameloop: FrameloopMode::default(),
            mobile_power_saver: false,
            mobile_breakpoint: default_mobile_breakpoint(),
        }
    }
}

fn default_model_path() -> String {
    "models/desktop_pc/scene.gltf".to_string()
}

fn default_spin_rate() -> f32 {
    0.2
}

fn default_mobile_breakpoint() -> f32 {
    500.0
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            info!("Loading config from {}", path.display());
            Self::from_file(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scene.model_path.is_empty() {
            return Err(ConfigError::InvalidValue("scene.model_path is empty".into()));
        }
        if self.scene.mobile_breakpoint <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "scene.mobile_breakpoint must be positive".into(),
            ));
        }
        if self.window.pixel_density <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "window.pixel_density must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.scene.spin_rate, 0.2);
        assert_eq!(config.scene.mobile_breakpoint, 500.0);
        assert_eq!(config.scene.frameloop, FrameloopMode::Always);
        assert!(!config.scene.cast_shadows);
        assert!(!config.scene.mobile_power_saver);
        assert_eq!(config.window.pixel_density, 1.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml_str = r#"
            [scene]
            cast_shadows = true
            frameloop = "reactive"
            mobile_power_saver = true

            [window]
            title = "My Portfolio"
        "#;
        let config: SiteConfig = toml::from_str(toml_str).unwrap();
        assert!(config.scene.cast_shadows);
        assert_eq!(config.scene.frameloop, FrameloopMode::Reactive);
        assert!(config.scene.mobile_power_saver);
        assert_eq!(config.window.title, "My Portfolio");
        // Unspecified fields keep their defaults
        assert_eq!(config.scene.spin_rate, 0.2);
        assert_eq!(config.window.canvas, "#folio-canvas");
    }

    #[test]
    fn test_invalid_breakpoint_rejected() {
        let mut config = SiteConfig::default();
        config.scene.mobile_breakpoint = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = SiteConfig::load_or_default(&dir.path().join("folio.toml")).unwrap();
        assert_eq!(config.window.title, "Folio");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[scene]\nspin_rate = 0.5\n").unwrap();
        let config = SiteConfig::from_file(&path).unwrap();
        assert_eq!(config.scene.spin_rate, 0.5);
    }
}
