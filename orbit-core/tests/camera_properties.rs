use approx::assert_relative_eq;
use orbit_core::gesture::RotationDelta;
use orbit_core::matrix::{self, Mat4};
use orbit_core::{InputEvent, OrbitController, TouchId, TouchPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_mat4(rng: &mut StdRng) -> Mat4 {
    let mut m = [0.0; 16];
    for value in m.iter_mut() {
        *value = rng.random_range(-2.0f32..2.0);
    }
    Mat4(m)
}

fn ndc_depth(projection: &Mat4, z_eye: f32) -> f32 {
    let clip = projection.transform_point([0.0, 0.0, z_eye, 1.0]);
    clip[2] / clip[3]
}

#[test]
fn zero_rotations_are_exact_identity() {
    assert_eq!(matrix::rotation_x(0.0), Mat4::IDENTITY);
    assert_eq!(matrix::rotation_y(0.0), Mat4::IDENTITY);
}

#[test]
fn multiply4_is_associative() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..64 {
        let (a, b, c) = (
            random_mat4(&mut rng),
            random_mat4(&mut rng),
            random_mat4(&mut rng),
        );
        let left = matrix::multiply4(&matrix::multiply4(&a, &b), &c);
        let right = matrix::multiply4(&a, &matrix::multiply4(&b, &c));
        for (l, r) in left.0.iter().zip(right.0.iter()) {
            assert_relative_eq!(*l, *r, epsilon = 1e-3);
        }
    }
}

#[test]
fn perspective_maps_near_and_far_planes() {
    let projection = matrix::perspective(60.0, 1.0, 0.1, 100.0);
    assert_relative_eq!(ndc_depth(&projection, -0.1), -1.0, epsilon = 1e-4);
    assert_relative_eq!(ndc_depth(&projection, -100.0), 1.0, epsilon = 1e-4);

    // w carries -z_eye.
    let clip = projection.transform_point([0.0, 0.0, -7.0, 1.0]);
    assert_eq!(clip[3], 7.0);
}

#[test]
fn mouse_drag_released_off_canvas() {
    let mut controller = OrbitController::default();
    controller.handle(&InputEvent::MouseDown { button: 0 });
    let update = controller.handle(&InputEvent::MouseMove {
        movement_x: 10.0,
        movement_y: -5.0,
    });
    assert_eq!(
        update.rotation,
        Some(RotationDelta {
            pitch: -1.0,
            yaw: 2.0
        })
    );
    assert_eq!(controller.camera().rotation.pitch, 14.0);
    assert_eq!(controller.camera().rotation.yaw, 2.0);

    // The release is delivered by the document-level listener.
    controller.handle(&InputEvent::MouseUp { button: 0 });
    let after = controller.handle(&InputEvent::MouseMove {
        movement_x: 40.0,
        movement_y: 40.0,
    });
    assert!(after.is_empty());
    assert_eq!(controller.camera().rotation.pitch, 14.0);
    assert_eq!(controller.camera().rotation.yaw, 2.0);
}

#[test]
fn wheel_notches_scale_distance() {
    let mut controller = OrbitController::default();
    let update = controller.handle(&InputEvent::Wheel {
        wheel_delta_y: 120.0,
    });
    assert_eq!(update.zoom, Some(0.92));
    assert_eq!(controller.camera().distance, 5.0 * 0.92);

    let mut controller = OrbitController::default();
    let update = controller.handle(&InputEvent::Wheel {
        wheel_delta_y: -240.0,
    });
    assert_relative_eq!(update.zoom.unwrap(), 1.16, epsilon = 1e-6);
    assert_relative_eq!(controller.camera().distance, 5.8, epsilon = 1e-5);
}

#[test]
fn lifting_primary_promotes_secondary_to_single_touch() {
    let mut controller = OrbitController::default();
    controller.handle(&InputEvent::TouchStart(vec![TouchPoint::new(1, 0.0, 0.0)]));
    controller.handle(&InputEvent::TouchStart(vec![TouchPoint::new(2, 100.0, 0.0)]));
    controller.handle(&InputEvent::TouchEnd(vec![TouchPoint::new(1, 0.0, 0.0)]));
    assert_eq!(
        controller.tracker().touches().primary().map(|slot| slot.id),
        Some(TouchId(2))
    );

    let update = controller.handle(&InputEvent::TouchMove(vec![TouchPoint::new(2, 110.0, 0.0)]));
    // Single-touch scale (0.2), and no pinch zoom.
    assert_eq!(
        update.rotation,
        Some(RotationDelta {
            pitch: 0.0,
            yaw: 2.0
        })
    );
    assert!(update.zoom.is_none());
}

fn pinch(d: f32) -> f32 {
    let mut controller = OrbitController::default();
    controller.handle(&InputEvent::TouchStart(vec![
        TouchPoint::new(1, 100.0, 200.0),
        TouchPoint::new(2, 300.0, 200.0),
    ]));
    // Positive `d` moves both contacts outward along the connecting line.
    let update = controller.handle(&InputEvent::TouchMove(vec![
        TouchPoint::new(1, 100.0 - d, 200.0),
        TouchPoint::new(2, 300.0 + d, 200.0),
    ]));
    let rotation = update.rotation.unwrap();
    assert_eq!(rotation.yaw, 0.0);
    update.zoom.unwrap()
}

#[test]
fn pinch_spread_pulls_camera_closer() {
    let factor = pinch(10.0);
    assert!(factor < 1.0);
    assert_relative_eq!(factor, 0.96, epsilon = 1e-5);
}

#[test]
fn pinch_squeeze_pushes_camera_away() {
    let factor = pinch(-10.0);
    assert!(factor > 1.0);
    assert_relative_eq!(factor, 1.04, epsilon = 1e-5);
}
