/// ASCII rasterizer driven by the orbit camera matrices
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3, Vector4};
use orbit_core::{Mat4, Mesh, Triangle};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A vertex after projection: column, row, and NDC depth.
type ScreenVertex = (f32, f32, f32);

pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Draw `mesh` with `view_projection * model`.
    ///
    /// `light_dir` is in world space; faces are shaded by their world normal.
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model: &Mat4,
        view_projection: &Mat4,
        light_dir: Vector3<f32>,
    ) {
        let model_na: Matrix4<f32> = (*model).into();
        let mvp: Matrix4<f32> = Matrix4::from(*view_projection) * model_na;
        let light_dir = light_dir.normalize();

        for triangle in &mesh.triangles {
            let normal = model_na.transform_vector(&triangle.face_normal());
            let brightness = normal.normalize().dot(&light_dir).max(0.0);
            self.render_triangle(triangle, &mvp, brightness);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, mvp: &Matrix4<f32>, brightness: f32) {
        let mut screen = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen.iter_mut().zip(triangle.vertices.iter()) {
            match self.project(mvp, vertex.position.to_homogeneous()) {
                Some(projected) => *slot = projected,
                None => return, // Triangle is clipped
            }
        }

        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen, character);
    }

    /// Clip-space transform, perspective divide, and viewport mapping.
    fn project(&self, mvp: &Matrix4<f32>, point: Vector4<f32>) -> Option<ScreenVertex> {
        let clip = mvp * point;

        // Behind the eye, or on the w = 0 plane.
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        Some((screen_x, screen_y, ndc.z))
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenVertex; 3], character: char) {
        let [v0, v1, v2] = *coords;

        // Bounding box, clipped to the screen
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn covered_cells(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
