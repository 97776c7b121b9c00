// config.rs - Inspector configuration file
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplodeConfig {
    /// Displacement along each part's direction at parameter 1
    pub scale_factor: f32,
    /// Range the control is expected to produce
    pub range: [f32; 2],
    /// Clamp incoming parameters to `range` instead of extrapolating
    pub clamp: bool,
}

impl Default for ExplodeConfig {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            range: [0.0, 1.0],
            clamp: false,
        }
    }
}

impl ExplodeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            bail!("explode.scale_factor must be a positive number, got {}", self.scale_factor);
        }
        let [lo, hi] = self.range;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            bail!("explode.range must be finite with min <= max, got [{}, {}]", lo, hi);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [5.0, 5.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            bail!("camera.fov_y_degrees must be in (0, 180), got {}", self.fov_y_degrees);
        }
        if !(self.near > 0.0 && self.far > self.near) {
            bail!("camera clip planes need 0 < near < far, got {} / {}", self.near, self.far);
        }
        if Vec3::from_array(self.position) == Vec3::from_array(self.target) {
            bail!("camera.position and camera.target must differ");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub explode: ExplodeConfig,
    pub camera: CameraConfig,
    /// Initial viewport size in pixels
    pub viewport: [f32; 2],
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            explode: ExplodeConfig::default(),
            camera: CameraConfig::default(),
            viewport: [1280.0, 720.0],
        }
    }
}

impl InspectorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Invalid inspector config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("In config file {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        self.explode.validate()?;
        self.camera.validate()
    }
}
