//! Orbit Core - camera interaction model and matrix math
//!
//! Stateless matrix construction, the orbit camera those matrices are derived
//! from, and the gesture tracker that turns pointer and touch input into
//! camera motion. No platform dependencies; the terminal and web hosts build
//! on top of this crate.

pub mod camera;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod matrix;
pub mod options;

// Re-export commonly used types
pub use camera::{CameraState, FrameUniforms, RotationState};
pub use controller::OrbitController;
pub use error::OrbitError;
pub use geometry::{Mesh, ScreenTriangle, Triangle, Vertex};
pub use gesture::{
    CameraUpdate, GestureTracker, InputEvent, InputSink, MouseDrag, TouchId, TouchPoint,
    TouchSlot, TouchSlots,
};
pub use matrix::{Mat3, Mat4};
pub use options::{CameraOptions, ProjectionOptions};
