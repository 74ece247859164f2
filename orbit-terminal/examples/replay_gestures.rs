/// Example: replay a scripted gesture sequence and print what a renderer would upload
///
/// Usage: cargo run --example replay_gestures -- [camera-options.toml]
use std::io;
use std::path::Path;
use orbit_core::{CameraOptions, InputEvent, InputSink, OrbitController, TouchPoint};

fn main() -> io::Result<()> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => CameraOptions::load(Path::new(&path))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?,
        None => CameraOptions::default(),
    };
    let mut controller = OrbitController::new(options);

    let script = [
        InputEvent::MouseDown { button: 0 },
        InputEvent::MouseMove { movement_x: 25.0, movement_y: 10.0 },
        InputEvent::MouseUp { button: 0 },
        InputEvent::Wheel { wheel_delta_y: 240.0 },
        InputEvent::TouchStart(vec![TouchPoint::new(1, 200.0, 300.0)]),
        InputEvent::TouchStart(vec![TouchPoint::new(2, 400.0, 300.0)]),
        InputEvent::TouchMove(vec![
            TouchPoint::new(1, 190.0, 300.0),
            TouchPoint::new(2, 410.0, 300.0),
        ]),
        InputEvent::TouchEnd(vec![TouchPoint::new(1, 190.0, 300.0)]),
        InputEvent::TouchMove(vec![TouchPoint::new(2, 420.0, 310.0)]),
        InputEvent::TouchEnd(vec![TouchPoint::new(2, 420.0, 310.0)]),
    ];

    for event in &script {
        controller.dispatch(event);
        let camera = controller.camera();
        println!(
            "{event:?}\n  -> pitch {:.2} yaw {:.2} distance {:.3}",
            camera.rotation.pitch, camera.rotation.yaw, camera.distance
        );
    }

    let frame = controller.frame(16.0 / 9.0);
    println!("\nuniforms: {frame:?}");
    println!("view (column-major): {:?}", controller.camera().view_matrix().to_column_major());
    Ok(())
}
