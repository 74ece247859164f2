//! Mouse and multi-touch gesture tracking.
//!
//! [`GestureTracker`] turns raw host input into [`CameraUpdate`]s. The mouse
//! track is a two-state drag machine; the touch track keeps at most two
//! contacts in [`TouchSlots`].
use nalgebra::Vector2;

use crate::camera::CameraState;

/// `button` value of the primary mouse button.
pub const PRIMARY_BUTTON: i16 = 0;
/// Degrees of rotation per pixel of single-pointer movement.
pub const DRAG_ROTATE_SCALE: f32 = 0.2;
/// Degrees per pixel for each finger while two touches are down.
pub const TWO_TOUCH_ROTATE_SCALE: f32 = 0.1;
/// Wheel units per notch.
pub const WHEEL_NOTCH: f32 = 120.0;
pub const WHEEL_ZOOM_SCALE: f32 = 0.08;
pub const PINCH_ZOOM_SCALE: f32 = 0.002;

/// Stable per-contact identifier supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub i32);

/// One changed contact inside a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    /// Absolute position in client pixels.
    pub position: Vector2<f32>,
}

impl TouchPoint {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self {
            id: TouchId(id),
            position: Vector2::new(x, y),
        }
    }
}

/// Input accepted by an [`InputSink`].
///
/// Hosts only send `MouseDown` for presses over the canvas; `MouseUp` and
/// `MouseMove` come from a wider scope so drags can end off-canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseDown { button: i16 },
    MouseUp { button: i16 },
    /// Relative pointer movement since the previous move event.
    MouseMove { movement_x: f32, movement_y: f32 },
    /// Signed vertical wheel delta, 120 per notch, positive away from the user.
    Wheel { wheel_delta_y: f32 },
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    TouchEnd(Vec<TouchPoint>),
    TouchCancel(Vec<TouchPoint>),
}

/// Receiver of host input. Handlers run synchronously on the host's event thread.
pub trait InputSink {
    fn dispatch(&mut self, event: &InputEvent);
}

/// Rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationDelta {
    pub pitch: f32,
    pub yaw: f32,
}

/// Deltas produced by a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraUpdate {
    pub rotation: Option<RotationDelta>,
    /// Multiplier applied to the camera distance.
    pub zoom: Option<f32>,
}

impl CameraUpdate {
    fn rotate(pitch: f32, yaw: f32) -> Self {
        Self {
            rotation: Some(RotationDelta { pitch, yaw }),
            zoom: None,
        }
    }

    fn zoom(factor: f32) -> Self {
        Self {
            rotation: None,
            zoom: Some(factor),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rotation.is_none() && self.zoom.is_none()
    }

    pub fn apply_to(&self, camera: &mut CameraState) {
        if let Some(rotation) = self.rotation {
            camera.apply_rotation_delta(rotation.pitch, rotation.yaw);
        }
        if let Some(factor) = self.zoom {
            camera.apply_zoom_factor(factor);
        }
    }
}

/// Mouse drag state, scoped to one press-move-release sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseDrag {
    #[default]
    Idle,
    Dragging,
}

/// An occupied touch slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSlot {
    pub id: TouchId,
    /// Last known position.
    pub position: Vector2<f32>,
}

impl From<TouchPoint> for TouchSlot {
    fn from(touch: TouchPoint) -> Self {
        Self {
            id: touch.id,
            position: touch.position,
        }
    }
}

/// Primary/secondary slot occupancy. A secondary contact cannot exist
/// without a primary one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TouchSlots {
    #[default]
    Empty,
    One(TouchSlot),
    Two(TouchSlot, TouchSlot),
}

impl TouchSlots {
    pub fn primary(&self) -> Option<&TouchSlot> {
        match self {
            Self::Empty => None,
            Self::One(primary) | Self::Two(primary, _) => Some(primary),
        }
    }

    pub fn secondary(&self) -> Option<&TouchSlot> {
        match self {
            Self::Two(_, secondary) => Some(secondary),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn contains(&self, id: TouchId) -> bool {
        self.primary().is_some_and(|slot| slot.id == id)
            || self.secondary().is_some_and(|slot| slot.id == id)
    }

    /// Claim the first free slot. Returns false when the touch was ignored.
    fn claim(&mut self, touch: TouchPoint) -> bool {
        if self.contains(touch.id) {
            return false;
        }
        *self = match *self {
            Self::Empty => Self::One(touch.into()),
            Self::One(primary) => Self::Two(primary, touch.into()),
            Self::Two(..) => return false,
        };
        true
    }

    /// Release the slot held by `id`, promoting the secondary contact when
    /// the primary one lifts.
    fn release(&mut self, id: TouchId) {
        *self = match *self {
            Self::Two(primary, secondary) if primary.id == id => Self::One(secondary),
            Self::Two(primary, secondary) if secondary.id == id => Self::One(primary),
            Self::One(primary) if primary.id == id => Self::Empty,
            unchanged => unchanged,
        };
    }
}

/// Fuses mouse and touch input into camera rotation and zoom.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    mouse: MouseDrag,
    touches: TouchSlots,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse(&self) -> MouseDrag {
        self.mouse
    }

    pub fn touches(&self) -> &TouchSlots {
        &self.touches
    }

    /// Advance the state machine and return the deltas to apply.
    pub fn handle(&mut self, event: &InputEvent) -> CameraUpdate {
        match event {
            InputEvent::MouseDown { button } => {
                if *button == PRIMARY_BUTTON {
                    self.mouse = MouseDrag::Dragging;
                }
                CameraUpdate::default()
            }
            InputEvent::MouseUp { button } => {
                if *button == PRIMARY_BUTTON {
                    self.mouse = MouseDrag::Idle;
                }
                CameraUpdate::default()
            }
            InputEvent::MouseMove {
                movement_x,
                movement_y,
            } => match self.mouse {
                MouseDrag::Dragging => CameraUpdate::rotate(
                    movement_y * DRAG_ROTATE_SCALE,
                    movement_x * DRAG_ROTATE_SCALE,
                ),
                MouseDrag::Idle => CameraUpdate::default(),
            },
            InputEvent::Wheel { wheel_delta_y } => {
                CameraUpdate::zoom(wheel_zoom_factor(*wheel_delta_y))
            }
            InputEvent::TouchStart(touches) => {
                for touch in touches {
                    if self.touches.claim(*touch) {
                        log::debug!("touch {:?} down, {} active", touch.id, self.touches.len());
                    } else {
                        log::trace!("touch {:?} ignored, slots full", touch.id);
                    }
                }
                CameraUpdate::default()
            }
            InputEvent::TouchEnd(touches) | InputEvent::TouchCancel(touches) => {
                for touch in touches {
                    self.touches.release(touch.id);
                }
                log::debug!("touches lifted, {} active", self.touches.len());
                CameraUpdate::default()
            }
            InputEvent::TouchMove(touches) => self.touch_move(touches),
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint]) -> CameraUpdate {
        // A batch may carry several records for one contact; sum them all.
        let mut primary_move = Vector2::<f32>::zeros();
        let mut secondary_move = Vector2::<f32>::zeros();
        for touch in touches {
            let (slot, moved) = match &mut self.touches {
                TouchSlots::One(primary) | TouchSlots::Two(primary, _)
                    if primary.id == touch.id =>
                {
                    (primary, &mut primary_move)
                }
                TouchSlots::Two(_, secondary) if secondary.id == touch.id => {
                    (secondary, &mut secondary_move)
                }
                _ => continue,
            };
            *moved += touch.position - slot.position;
            slot.position = touch.position;
        }

        if primary_move == Vector2::zeros() && secondary_move == Vector2::zeros() {
            return CameraUpdate::default();
        }

        match &self.touches {
            TouchSlots::Empty => CameraUpdate::default(),
            TouchSlots::One(_) => CameraUpdate::rotate(
                primary_move.y * DRAG_ROTATE_SCALE,
                primary_move.x * DRAG_ROTATE_SCALE,
            ),
            TouchSlots::Two(primary, secondary) => {
                let mut update = CameraUpdate::rotate(
                    (primary_move.y + secondary_move.y) * TWO_TOUCH_ROTATE_SCALE,
                    (primary_move.x + secondary_move.x) * TWO_TOUCH_ROTATE_SCALE,
                );
                update.zoom = Some(pinch_zoom_factor(
                    primary.position,
                    primary_move,
                    secondary.position,
                    secondary_move,
                ));
                update
            }
        }
    }
}

/// `1 - 0.08 * (wheel_delta_y / 120)`: one notch away from the user zooms in by 8%.
pub fn wheel_zoom_factor(wheel_delta_y: f32) -> f32 {
    1.0 - WHEEL_ZOOM_SCALE * (wheel_delta_y / WHEEL_NOTCH)
}

/// Distance multiplier for a two-finger batch.
///
/// Each displacement is projected onto the unit vector pointing at the other
/// contact's current position; the factor is `1 + 0.002 * (sum)`. Spreading
/// the fingers gives a negative sum (factor below one, camera moves closer).
/// Coincident positions normalize a zero vector and yield NaN.
pub fn pinch_zoom_factor(
    primary: Vector2<f32>,
    primary_move: Vector2<f32>,
    secondary: Vector2<f32>,
    secondary_move: Vector2<f32>,
) -> f32 {
    let towards_secondary = primary_move.dot(&(secondary - primary).normalize());
    let towards_primary = secondary_move.dot(&(primary - secondary).normalize());
    1.0 + PINCH_ZOOM_SCALE * (towards_secondary + towards_primary)
}
