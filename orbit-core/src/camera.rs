//! Orbit camera state and the per-frame values derived from it.
use nalgebra::Vector3;

use crate::matrix::{self, Mat4};
use crate::options::CameraOptions;

/// Accumulated orbit angles in degrees.
///
/// Neither angle is clamped or wrapped; pitch past +/-90 flips the view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub pitch: f32,
    pub yaw: f32,
}

impl RotationState {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
    }

    pub fn to_radians(self) -> [f32; 2] {
        [self.pitch.to_radians(), self.yaw.to_radians()]
    }
}

/// Orbit camera parameters. Written by the gesture tracker, read once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Distance from the target. Intended to stay positive but never clamped.
    pub distance: f32,
    pub rotation: RotationState,
    pub target: Vector3<f32>,
}

impl CameraState {
    pub fn new(distance: f32, rotation: RotationState, target: Vector3<f32>) -> Self {
        Self {
            distance,
            rotation,
            target,
        }
    }

    pub fn from_options(options: &CameraOptions) -> Self {
        let [x, y, z] = options.target;
        Self::new(
            options.distance,
            RotationState::new(options.pitch, options.yaw),
            Vector3::new(x, y, z),
        )
    }

    pub fn apply_rotation_delta(&mut self, d_pitch_deg: f32, d_yaw_deg: f32) {
        self.rotation.rotate(d_pitch_deg, d_yaw_deg);
    }

    /// `distance *= factor`, with no lower or upper bound.
    pub fn apply_zoom_factor(&mut self, factor: f32) {
        self.distance *= factor;
    }

    /// `translation(0, 0, -distance) * rotation_x(pitch) * rotation_y(yaw)`.
    pub fn view_matrix(&self) -> Mat4 {
        let [pitch, yaw] = self.rotation.to_radians();
        let orbit = matrix::multiply4(&matrix::rotation_x(pitch), &matrix::rotation_y(yaw));
        matrix::multiply4(&matrix::translation(0.0, 0.0, -self.distance), &orbit)
    }

    /// Values a render driver uploads as shader inputs for one frame.
    pub fn snapshot(&self, aspect_ratio: f32) -> FrameUniforms {
        FrameUniforms {
            aspect_ratio,
            camera_rotation: self.rotation.to_radians(),
            camera_distance: self.distance,
            camera_target: [self.target.x, self.target.y, self.target.z],
            model_matrix: None,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

/// Read-only per-frame copy of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Viewport aspect ratio, passed through from the render driver.
    pub aspect_ratio: f32,
    /// `[pitch, yaw]` in radians.
    pub camera_rotation: [f32; 2],
    pub camera_distance: f32,
    pub camera_target: [f32; 3],
    /// Row-major; only set for scenes with a transformable object.
    pub model_matrix: Option<Mat4>,
}

impl FrameUniforms {
    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model_matrix = Some(model);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::default();
        state.rotate(10.0, -20.0);
        state.rotate(95.0, 400.0);
        assert_eq!(state.pitch, 105.0);
        assert_eq!(state.yaw, 380.0);
    }

    #[test]
    fn test_zoom_is_unbounded() {
        let mut camera = CameraState::default();
        camera.apply_zoom_factor(0.0);
        assert_eq!(camera.distance, 0.0);

        let mut camera = CameraState::default();
        camera.apply_zoom_factor(-1.0);
        assert_eq!(camera.distance, -5.0);
    }

    #[test]
    fn test_view_matrix_without_rotation_is_pullback() {
        let camera = CameraState::new(7.0, RotationState::default(), Vector3::zeros());
        assert_eq!(camera.view_matrix(), matrix::translation(0.0, 0.0, -7.0));
    }

    #[test]
    fn test_view_matrix_composition_order() {
        let camera = CameraState::new(3.0, RotationState::new(30.0, 45.0), Vector3::zeros());
        let expected = matrix::translation(0.0, 0.0, -3.0)
            * matrix::rotation_x(30f32.to_radians())
            * matrix::rotation_y(45f32.to_radians());
        let view = camera.view_matrix();
        for (a, b) in view.0.iter().zip(expected.0.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }

        // The origin always ends up `distance` in front of the eye.
        let origin = view.transform_point([0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(origin[2], -3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_snapshot() {
        let mut camera = CameraState::default();
        camera.apply_rotation_delta(-15.0, 90.0);
        let frame = camera.snapshot(1.5);
        assert_eq!(frame.aspect_ratio, 1.5);
        assert_eq!(frame.camera_rotation[0], 0.0);
        assert_relative_eq!(frame.camera_rotation[1], std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
        assert_eq!(frame.camera_distance, 5.0);
        assert_eq!(frame.camera_target, [0.0, 1.0, 0.0]);
        assert!(frame.model_matrix.is_none());
        assert_eq!(
            frame.with_model(Mat4::IDENTITY).model_matrix,
            Some(Mat4::IDENTITY)
        );
    }
}
