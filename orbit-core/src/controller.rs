//! Application-owned camera context.
use crate::camera::{CameraState, FrameUniforms};
use crate::gesture::{CameraUpdate, GestureTracker, InputEvent, InputSink};
use crate::options::CameraOptions;

/// Owns the camera and the tracker that writes to it.
///
/// Hosts keep exactly one of these and pass it by reference into their input
/// handlers and their frame callback.
#[derive(Debug, Clone)]
pub struct OrbitController {
    camera: CameraState,
    tracker: GestureTracker,
    options: CameraOptions,
}

impl OrbitController {
    pub fn new(options: CameraOptions) -> Self {
        Self {
            camera: CameraState::from_options(&options),
            tracker: GestureTracker::new(),
            options,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Handle one event and return the update that was applied.
    pub fn handle(&mut self, event: &InputEvent) -> CameraUpdate {
        let update = self.tracker.handle(event);
        update.apply_to(&mut self.camera);
        update
    }

    /// Per-frame read for the render driver.
    pub fn frame(&self, aspect_ratio: f32) -> FrameUniforms {
        self.camera.snapshot(aspect_ratio)
    }

    /// Move the camera back to its configured placement. Gesture state is kept.
    pub fn reset_camera(&mut self) {
        self.camera = CameraState::from_options(&self.options);
        log::info!("camera reset to distance {}", self.camera.distance);
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(CameraOptions::default())
    }
}

impl InputSink for OrbitController {
    fn dispatch(&mut self, event: &InputEvent) {
        self.handle(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_mutates_camera() {
        let mut controller = OrbitController::default();
        controller.dispatch(&InputEvent::MouseDown { button: 0 });
        controller.dispatch(&InputEvent::MouseMove {
            movement_x: 5.0,
            movement_y: 0.0,
        });
        assert_eq!(controller.camera().rotation.yaw, 1.0);
        assert_eq!(controller.frame(2.0).aspect_ratio, 2.0);
    }

    #[test]
    fn test_reset_camera() {
        let mut controller = OrbitController::default();
        controller.handle(&InputEvent::Wheel { wheel_delta_y: 360.0 });
        assert_ne!(controller.camera().distance, 5.0);
        controller.reset_camera();
        assert_eq!(controller.camera(), &CameraState::default());
    }
}
