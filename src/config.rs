//! Configuration persistence for magnifier settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::render::image::IndicatorStyle;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for IndicatorColor {
    fn default() -> Self {
        Self::from_rgba_u8(IndicatorStyle::default().color)
    }
}

impl IndicatorColor {
    /// Convert from RGBA format (0-255), dropping alpha
    pub fn from_rgba_u8([r, g, b, _]: [u8; 4]) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnifierConfig {
    /// Width of the primary and staging surfaces in pixels
    pub surface_width: u32,
    /// Height of the primary and staging surfaces in pixels
    pub surface_height: u32,
    /// Outline color of the selection indicator
    pub indicator_color: IndicatorColor,
    /// Outline thickness of the selection indicator in pixels
    pub indicator_thickness: f32,
    /// Bilinear filtering when rescaling (nearest-neighbour when off)
    pub smooth_scaling: bool,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            surface_width: 800,
            surface_height: 600,
            indicator_color: IndicatorColor::default(),
            indicator_thickness: IndicatorStyle::default().thickness,
            smooth_scaling: true,
        }
    }
}

impl MagnifierConfig {
    /// Directory name under the user's config directory
    pub const ID: &'static str = "magnifier";

    /// Default location of the config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    pub fn indicator_style(&self) -> IndicatorStyle {
        IndicatorStyle {
            color: self.indicator_color.to_rgba_u8(),
            thickness: self.indicator_thickness.max(0.0),
        }
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("No config directory available for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }
}
