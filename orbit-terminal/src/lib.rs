/// Terminal host for the orbit camera: mouse-driven ASCII rendering
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Vector3;
use orbit_core::matrix::{self, Mat4};
use orbit_core::{CameraOptions, InputSink, Mesh, OrbitController};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod input;
pub mod renderer;

pub use input::MouseTranslator;
pub use renderer::AsciiRenderer;

/// Radians per frame of model spin while spinning is enabled.
const SPIN_PER_FRAME: f32 = 0.015;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    controller: OrbitController,
    mouse: MouseTranslator,
    renderer: AsciiRenderer,
    width: u16,
    height: u16,
    spin: Option<f32>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

/// Viewport aspect ratio in pixels, not cells.
pub fn aspect_ratio(width: u16, height: u16) -> f32 {
    (width as f32 * input::CELL_WIDTH_PX) / (height.max(1) as f32 * input::CELL_HEIGHT_PX)
}

impl TerminalApp {
    pub fn new(mesh: Mesh, options: CameraOptions) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        options
            .projection
            .validate(aspect_ratio(width, height))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        Ok(Self {
            mesh,
            controller: OrbitController::new(options),
            mouse: MouseTranslator::new(),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            width,
            height,
            spin: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event before drawing.
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            if let Some(angle) = self.spin.as_mut() {
                *angle += SPIN_PER_FRAME;
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Mouse(mouse) => {
                if let Some(input) = self.mouse.translate(&mouse) {
                    self.controller.dispatch(&input);
                }
            }
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('r') => self.controller.reset_camera(),
                KeyCode::Char(' ') => {
                    self.spin = match self.spin {
                        Some(_) => None,
                        None => Some(0.0),
                    };
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {width}x{height}");
                self.width = width;
                self.height = height;
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let aspect = aspect_ratio(self.width, self.height);
        let model = self.spin.map_or(Mat4::IDENTITY, matrix::rotation_y);
        let frame = self.controller.frame(aspect).with_model(model);

        // The view orbits the origin; shift the scene so the target sits there.
        let [tx, ty, tz] = frame.camera_target;
        let view_projection = self.controller.options().projection.projection_matrix(aspect)
            * self.controller.camera().view_matrix()
            * matrix::translation(-tx, -ty, -tz);

        self.renderer.clear();
        self.renderer.render_mesh(
            &self.mesh,
            &frame.model_matrix.unwrap_or(Mat4::IDENTITY),
            &view_projection,
            Vector3::new(0.3, 0.6, 1.0),
        );

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        let [pitch, yaw] = frame.camera_rotation;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Orbit | FPS: {:.1} | pitch {:.1} yaw {:.1} dist {:.2} | Drag=Rotate Wheel=Zoom Space=Spin R=Reset Q=Quit",
                self.fps,
                pitch.to_degrees(),
                yaw.to_degrees(),
                frame.camera_distance,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_accounts_for_cell_shape() {
        assert_eq!(aspect_ratio(80, 40), 1.0);
        assert_eq!(aspect_ratio(160, 40), 2.0);
        assert!(aspect_ratio(10, 0).is_finite());
    }
}
