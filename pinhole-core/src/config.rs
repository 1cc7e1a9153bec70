/// TOML scene description: camera, a cuboid and render options
use std::path::Path;

use serde::Deserialize;

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::framebuffer::Rgb;
use crate::geometry::Mesh;
use crate::plane::RayMode;
use crate::projector::Projector;
use crate::vector::Vec3;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub point_of_interest: [f32; 3],
    pub size: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -5.0],
            point_of_interest: [0.0, 0.0, 0.0],
            size: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeConfig {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 0.0],
            size: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RayModeConfig {
    #[default]
    Line,
    HalfLine,
}

impl From<RayModeConfig> for RayMode {
    fn from(mode: RayModeConfig) -> Self {
        match mode {
            RayModeConfig::Line => RayMode::Line,
            RayModeConfig::HalfLine => RayMode::HalfLine,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub color: Rgb,
    pub ray_mode: RayModeConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            ray_mode: RayModeConfig::Line,
        }
    }
}

/// Whole scene file; every section is optional
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub cube: CubeConfig,
    pub render: RenderOptions,
}

impl SceneConfig {
    pub fn from_toml_str(content: &str) -> RenderResult<Self> {
        toml::from_str(content).map_err(|e| RenderError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RenderError::Config(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Build the configured camera, validating it in the process
    pub fn camera(&self) -> RenderResult<Camera> {
        Camera::new(
            Vec3::from(self.camera.position),
            Vec3::from(self.camera.point_of_interest),
            self.camera.size,
        )
    }

    pub fn mesh(&self) -> Mesh {
        Mesh::cuboid(Vec3::from(self.cube.center), Vec3::from(self.cube.size))
    }

    pub fn projector(&self, width: usize, height: usize) -> Projector {
        Projector::new(width, height).with_mode(self.render.ray_mode.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_uses_defaults() {
        let config = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(config, SceneConfig::default());
        let camera = config.camera().unwrap();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_full_scene() {
        let config = SceneConfig::from_toml_str(
            r#"
            [camera]
            position = [1.0, 2.0, -8.0]
            size = 2.5

            [cube]
            center = [0.0, 1.0, 0.0]
            size = [2.0, 2.0, 2.0]

            [render]
            color = [255, 0, 64]
            ray_mode = "half-line"
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.point_of_interest, [0.0, 0.0, 0.0]);
        assert_eq!(config.camera.size, 2.5);
        assert_eq!(config.render.color, Rgb::new(255, 0, 64));
        assert_eq!(config.projector(10, 10).mode(), RayMode::HalfLine);
        assert_eq!(config.mesh().faces().len(), 6);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = SceneConfig::from_toml_str("[camera]\nfov = 45.0\n");
        assert!(matches!(result, Err(RenderError::Config(_))));
    }

    #[test]
    fn test_invalid_camera_surfaces_on_build() {
        let config = SceneConfig::from_toml_str("[camera]\nsize = 0.0\n").unwrap();
        assert!(matches!(config.camera(), Err(RenderError::InvalidCamera(_))));
    }
}
