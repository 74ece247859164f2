/// Orbit Terminal Demo - cube around the orbit target
///
/// Usage: orbit-terminal [camera-options.toml]
///
/// Controls:
///   - Left drag: Orbit
///   - Mouse wheel: Zoom
///   - Space: Toggle model spin
///   - R: Reset camera
///   - Q/ESC: Quit
use std::io;
use std::path::Path;
use orbit_core::{CameraOptions, Mesh};
use orbit_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => CameraOptions::load(Path::new(&path))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to load {path}: {e}")))?,
        None => CameraOptions::default(),
    };
    log::info!(
        "starting at distance {} pitch {} yaw {}",
        options.distance,
        options.pitch,
        options.yaw
    );

    let mut app = TerminalApp::new(Mesh::cube(2.0), options)?;
    app.run()
}
