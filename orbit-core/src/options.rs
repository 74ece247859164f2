//! Camera defaults and projection parameters, loadable from TOML.
//!
//! Every struct uses `#[serde(default)]`, so a file that only sets
//! `[projection]` keeps the built-in camera placement.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OrbitError;
use crate::matrix::{self, Mat4};

/// Initial orbit placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Distance from the target.
    pub distance: f32,
    /// Pitch in degrees.
    pub pitch: f32,
    /// Yaw in degrees.
    pub yaw: f32,
    /// World point the camera looks at.
    pub target: [f32; 3],
    pub projection: ProjectionOptions,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 5.0,
            pitch: 15.0,
            yaw: 0.0,
            target: [0.0, 1.0, 0.0],
            projection: ProjectionOptions::default(),
        }
    }
}

impl CameraOptions {
    /// Parse from a TOML string and validate the projection block.
    pub fn from_toml_str(s: &str) -> Result<Self, OrbitError> {
        let options: Self = toml::from_str(s)?;
        options.projection.validate(1.0)?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self, OrbitError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("Loaded camera options from {}", path.display());
        Ok(options)
    }

    pub fn to_toml_string(&self) -> Result<String, OrbitError> {
        toml::to_string_pretty(self).map_err(|e| OrbitError::OptionsParse(e.to_string()))
    }
}

/// Frustum parameters handed to [`matrix::perspective`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl ProjectionOptions {
    /// Reject inputs for which `perspective` is undefined.
    pub fn validate(&self, aspect_ratio: f32) -> Result<(), OrbitError> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(OrbitError::InvalidProjection(format!(
                "field of view {} must be inside (0, 180) degrees",
                self.fov_y_degrees
            )));
        }
        if !(aspect_ratio > 0.0) {
            return Err(OrbitError::InvalidProjection(format!(
                "aspect ratio {aspect_ratio} must be positive"
            )));
        }
        if !(self.near > 0.0) {
            return Err(OrbitError::InvalidProjection(format!(
                "near plane {} must be positive",
                self.near
            )));
        }
        if self.far == self.near {
            return Err(OrbitError::InvalidProjection(format!(
                "near and far planes coincide at {}",
                self.near
            )));
        }
        Ok(())
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        matrix::perspective(self.fov_y_degrees, aspect_ratio, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CameraOptions::default();
        assert_eq!(options.distance, 5.0);
        assert_eq!(options.pitch, 15.0);
        assert_eq!(options.target, [0.0, 1.0, 0.0]);
        assert!(options.projection.validate(16.0 / 9.0).is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = CameraOptions::from_toml_str(
            r#"
            distance = 12.5

            [projection]
            fov_y_degrees = 45.0
            "#,
        )
        .unwrap();
        assert_eq!(options.distance, 12.5);
        assert_eq!(options.pitch, 15.0);
        assert_eq!(options.projection.fov_y_degrees, 45.0);
        assert_eq!(options.projection.far, 100.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let options = CameraOptions {
            yaw: -30.0,
            ..CameraOptions::default()
        };
        let text = options.to_toml_string().unwrap();
        assert_eq!(CameraOptions::from_toml_str(&text).unwrap(), options);
    }

    #[test]
    fn test_rejects_degenerate_projection() {
        let err = CameraOptions::from_toml_str("[projection]\nfov_y_degrees = 180.0\n");
        assert!(matches!(err, Err(OrbitError::InvalidProjection(_))));

        let same_planes = ProjectionOptions {
            near: 1.0,
            far: 1.0,
            ..ProjectionOptions::default()
        };
        assert!(same_planes.validate(1.0).is_err());
        assert!(ProjectionOptions::default().validate(0.0).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = CameraOptions::from_toml_str("distance = \"far\"");
        assert!(matches!(err, Err(OrbitError::OptionsParse(_))));
    }
}
